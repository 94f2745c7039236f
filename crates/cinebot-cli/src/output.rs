use crate::render;
use cinebot_core::Reply;
use cinebot_models::{CanonicalMovie, MovieLinks};
use clap::ValueEnum;
use owo_colors::OwoColorize;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        match self.format {
            OutputFormat::Human => {
                println!("{} {}", "✓".green(), msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({
                    "type": "success",
                    "message": msg.as_ref()
                }));
            }
        }
    }

    pub fn error(&self, msg: impl AsRef<str>) {
        // Errors are shown even in quiet mode
        match self.format {
            OutputFormat::Human => {
                eprintln!("{} {}", "✗".red(), msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({
                    "type": "error",
                    "message": msg.as_ref()
                }));
            }
        }
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        match self.format {
            OutputFormat::Human => {
                println!("{}", msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({
                    "type": "info",
                    "message": msg.as_ref()
                }));
            }
        }
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        match self.format {
            OutputFormat::Human => {
                println!("{} {}", "⚠".yellow(), msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({
                    "type": "warning",
                    "message": msg.as_ref()
                }));
            }
        }
    }

    pub fn movie(&self, movie: &CanonicalMovie) {
        match self.format {
            OutputFormat::Human => {
                let mut lines = render::movie_lines(movie).into_iter();
                if let Some(heading) = lines.next() {
                    println!("{}", heading.bold());
                }
                for line in lines {
                    println!("  {}", line);
                }
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&render::movie_json(movie));
            }
        }
    }

    pub fn links(&self, title: &str, links: &MovieLinks) {
        match self.format {
            OutputFormat::Human => {
                println!("{}", title.bold());
                for line in render::link_lines(links) {
                    println!("  {}", line);
                }
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({ "title": title, "links": links }));
            }
        }
    }

    /// Print a chat reply the way the gateway would post it
    pub fn reply(&self, reply: &Reply) {
        match self.format {
            OutputFormat::Human => match reply {
                Reply::Movie(movie) => self.movie(movie),
                Reply::NotFound { .. } | Reply::TimedOut { .. } | Reply::Rejected(_) => {
                    println!("{} {}", "✗".red(), render::reply_text(reply));
                }
                Reply::Busy | Reply::Usage(_) => {
                    println!("{} {}", "⚠".yellow(), render::reply_text(reply));
                }
                _ => println!("{}", render::reply_text(reply)),
            },
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&render::reply_json(reply));
            }
        }
    }

    pub fn json(&self, data: &serde_json::Value) {
        if self.quiet && self.format != OutputFormat::Human {
            return;
        }

        self.print_json(data);
    }

    fn print_json(&self, data: &serde_json::Value) {
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(data).unwrap_or_default());
            }
            OutputFormat::JsonPretty => {
                println!("{}", serde_json::to_string_pretty(data).unwrap_or_default());
            }
            OutputFormat::Human => {
                println!("{}", data);
            }
        }
    }
}
