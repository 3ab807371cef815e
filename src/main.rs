mod entry;

use std::process::ExitCode;

use paceload::error::AppResult;

fn main() -> AppResult<ExitCode> {
    entry::run()
}
