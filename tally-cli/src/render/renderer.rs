use tally_core::{Entry, EntryKind};
use termimad::{
    MadSkin,
    crossterm::style::{Color, Stylize},
};

#[derive(Clone)]
pub struct RenderOptions {
    pub date_format: String,
    pub use_color: bool,
}

pub struct Renderer {
    skin: MadSkin,
    opts: RenderOptions,
}

impl Renderer {
    pub fn new(opts: RenderOptions) -> Self {
        Self {
            skin: MadSkin::default(),
            opts,
        }
    }

    pub fn print_md(&self, md: &str) {
        if self.opts.use_color {
            self.skin.print_text(md);
        } else {
            println!("{md}");
        }
    }

    pub fn print_info(&self, message: &str) {
        if self.opts.use_color {
            let md = format!("|-|\n| {message} |\n|-|\n");
            self.skin.print_text(&md);
        } else {
            println!("{message}");
        }
    }

    /// One entry per line: `date time | description | vendor | amount`,
    /// with the amount colored by kind when colors are on.
    pub fn print_entry_line(&self, entry: &Entry) {
        let mut date = entry.date.format(&self.opts.date_format).to_string();
        let mut time = entry.time.format("%H:%M:%S").to_string();
        let mut amount = entry.amount.to_string();
        if self.opts.use_color {
            date = date.with(Color::Cyan).to_string();
            time = time.with(Color::Blue).to_string();
            amount = match entry.kind() {
                EntryKind::Deposit => amount.with(Color::Green).to_string(),
                EntryKind::Payment => amount.with(Color::Red).to_string(),
            };
        }
        println!(
            "{} {} | {} | {} | {}",
            date, time, entry.description, entry.vendor, amount
        );
    }

    pub fn print_entries(&self, entries: &[&Entry]) {
        for entry in entries {
            self.print_entry_line(entry);
        }
    }
}
