use std::error::Error;
use worklog::commands::Cli;

fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();
    Cli::menu()
}
