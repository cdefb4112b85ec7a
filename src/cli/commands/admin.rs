use anyhow::Context;
use std::io::{BufRead, Write};

use crate::config::Config;
use crate::db::OwnerChange;
use crate::state::AppState;

/// Sets the owner's login credentials, prompting for whatever was not given
/// on the command line.
pub async fn cmd_admin(
    config: &Config,
    username: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let (username, password) = {
        let stdin = std::io::stdin();
        let mut input = stdin.lock();
        let mut output = std::io::stdout();
        resolve_credentials(username, password, &mut input, &mut output)?
    };

    let state = AppState::new(config.clone()).await?;

    let (_, change) = state
        .auth
        .set_owner_credentials(&username, &password)
        .await?;

    match change {
        OwnerChange::Updated => println!("Updating user..."),
        OwnerChange::Created => println!("Creating user..."),
    }

    println!("Done.");
    Ok(())
}

/// Fills in missing credentials from `input`. A prompted password must be
/// entered twice; a mismatch is an error.
pub fn resolve_credentials(
    username: Option<String>,
    password: Option<String>,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> anyhow::Result<(String, String)> {
    let username = match username {
        Some(u) => u,
        None => prompt(input, output, "Username")?,
    };

    let password = match password {
        Some(p) => p,
        None => {
            let first = prompt(input, output, "Password")?;
            let second = prompt(input, output, "Repeat for confirmation")?;
            if first != second {
                anyhow::bail!("Error: The two entered values do not match.");
            }
            first
        }
    };

    Ok((username, password))
}

fn prompt(
    input: &mut impl BufRead,
    output: &mut impl Write,
    label: &str,
) -> anyhow::Result<String> {
    write!(output, "{label}: ")?;
    output.flush()?;

    let mut line = String::new();
    let read = input.read_line(&mut line).context("Failed to read from stdin")?;
    if read == 0 {
        anyhow::bail!("Unexpected end of input while reading {label}");
    }

    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
