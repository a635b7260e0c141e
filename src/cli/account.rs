use crate::{RhapsodySdk, info, success};

use super::{fail, spinner};

pub async fn account(sdk: &RhapsodySdk) {
    let pb = spinner("Loading account...");
    let result = sdk.load_account().await;
    pb.finish_and_clear();

    let account = result.unwrap_or_else(|e| fail("Cannot load account", e));

    let name = [account.first_name.as_deref(), account.last_name.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");
    if name.is_empty() {
        success!("Account {}", account.id);
    } else {
        success!("{} ({})", name, account.id);
    }

    let fields = [
        ("Logon", account.logon),
        ("Email", account.email),
        ("Country", account.country),
        ("Catalog", account.catalog),
        ("Locale", account.locale),
        ("Tier", account.tier_name),
        ("Product", account.product_name),
        ("State", account.state),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            info!("{}: {}", label, value);
        }
    }

    if let Some(trial) = account.is_trial {
        info!("Trial: {}", if trial { "yes" } else { "no" });
    }
}
