//! Report rendering and output.

pub mod generator;

pub use generator::{
    generate_json_report, generate_markdown_report, subject_summary_text, write_report,
};
