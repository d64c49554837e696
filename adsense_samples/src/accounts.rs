//! Accounts: listing, selecting one to work with, and the tree of sub-accounts.

use crate::output::{print_pages, print_title};
use crate::services::Services;

use adsense_common::adsense_v2::Account;
use adsense_common::{ListResponse, Result, StreamExt};

use futures::future::{FutureExt, LocalBoxFuture};
use std::io::{BufRead, Write};

fn describe(account: &Account) -> String {
    format!(
        "Account with ID \"{}\" and name \"{}\" was found.",
        account.name.as_deref().unwrap_or("(unknown)"),
        account.display_name.as_deref().unwrap_or("(unknown)")
    )
}

pub async fn get_all_accounts(s: &Services) -> Result<Vec<Account>> {
    print_title("Listing all AdSense accounts");
    let params = s.accounts_params();
    print_pages(s.accounts.list_pages(&params), "No accounts found.", |a: &Account| {
        println!("{}", describe(a))
    })
    .await
}

/// Let the user pick one of `accounts`. A single account is picked without asking. Invalid input
/// is asked for again; running out of input is an error.
pub fn select_account<R: BufRead, W: Write>(
    accounts: &[Account],
    input: &mut R,
    out: &mut W,
) -> Result<Option<Account>> {
    match accounts.len() {
        0 => return Ok(None),
        1 => {
            writeln!(
                out,
                "Only one account found ({}), using it.",
                accounts[0].name.as_deref().unwrap_or("")
            )?;
            return Ok(Some(accounts[0].clone()));
        }
        _ => {}
    }

    writeln!(out, "Multiple accounts were found. Please choose:")?;
    for (i, acc) in accounts.iter().enumerate() {
        writeln!(
            out,
            " {}) {} ({})",
            i + 1,
            acc.display_name.as_deref().unwrap_or(""),
            acc.name.as_deref().unwrap_or("")
        )?;
    }
    loop {
        write!(out, "Please choose number 1-{}> ", accounts.len())?;
        out.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(anyhow::anyhow!("No account chosen"));
        }
        match line.trim().parse::<usize>() {
            Ok(n) if n >= 1 && n <= accounts.len() => {
                let chosen = accounts[n - 1].clone();
                writeln!(
                    out,
                    "Account {} chosen, resuming.",
                    chosen.name.as_deref().unwrap_or("")
                )?;
                return Ok(Some(chosen));
            }
            _ => writeln!(out, "Invalid choice: {}", line.trim())?,
        }
    }
}

/// The account to run samples for: `--account`, or chosen from all accounts of the user.
pub async fn choose_account(s: &Services, configured: &Option<String>) -> Result<Option<String>> {
    if let Some(ref name) = configured {
        return Ok(Some(name.clone()));
    }
    let params = s.accounts_params();
    let mut accounts = vec![];
    let pages = s.accounts.list_pages(&params);
    tokio::pin!(pages);
    while let Some(page) = pages.next().await {
        accounts.extend(page?.into_items());
    }
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let chosen = select_account(&accounts, &mut stdin.lock(), &mut stdout.lock())?;
    Ok(chosen.and_then(|a| a.name))
}

pub async fn display_account_tree(s: &Services, account_name: &str) -> Result<()> {
    print_title(&format!("Displaying AdSense account tree for {}", account_name));
    let account = s.accounts.get(account_name).await?;
    display_tree(s, account, 0).await?;
    println!();
    Ok(())
}

fn display_tree<'a>(s: &'a Services, account: Account, level: usize) -> LocalBoxFuture<'a, Result<()>> {
    async move {
        println!("{}{}", "  ".repeat(level), describe(&account));
        let name = match account.name {
            Some(name) => name,
            None => return Ok(()),
        };
        let params = s.list_params(&name);
        let mut children = vec![];
        {
            let pages = s.accounts.list_child_accounts_pages(&params);
            tokio::pin!(pages);
            while let Some(page) = pages.next().await {
                children.extend(page?.into_items());
            }
        }
        for child in children {
            display_tree(s, child, level + 1).await?;
        }
        Ok(())
    }
    .boxed_local()
}
