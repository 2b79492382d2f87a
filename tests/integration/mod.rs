//! Integration tests for release-page

mod test_cli;
mod test_generate;
