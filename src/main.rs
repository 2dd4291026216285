//! menu-locale
//!
//! Command-line front end for the menu translation cache.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    match menu_locale::run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Empty errors come from clap, which already printed its message
            let msg = e.to_string();
            if !msg.is_empty() {
                eprintln!("Error: {e}");
            }

            ExitCode::from(e.exit_code() as u8)
        },
    }
}
