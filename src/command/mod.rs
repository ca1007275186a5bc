pub use self::charset::Charset;
pub use self::command::Command;
pub use self::code_table::CodeTable;

mod charset;
mod code_table;
mod command;
