mod component;
mod export;
mod inline;
mod markdown;
mod panel;
mod pdf;
mod view;

pub use component::ConsoleOutput;
pub use export::ExportSettings;
