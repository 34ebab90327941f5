/// Formatter adapters for export output formats
mod csv_formatter;

pub use csv_formatter::CsvFormatter;
