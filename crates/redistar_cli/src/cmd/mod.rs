/// JSON-to-stream encode command.
pub mod encode;
/// Stream summary command.
pub mod info;
/// Stream decode and print command.
pub mod inspect;
/// Tagged JSON form of records.
pub mod json;
/// Shared CLI helpers.
pub mod util;

#[cfg(test)]
mod test_support;
