mod entry;
mod logger;

use dialogue_probe::error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
