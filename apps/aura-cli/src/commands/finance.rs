// finance.rs — Financial snapshot view.

use aura_backend::FinancialSnapshot;

use crate::app::App;

pub async fn execute(app: &App, advisor: bool, json: bool) -> anyhow::Result<()> {
    let snapshot = app.backend.fetch_financial_snapshot().await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print!("{}", render(&snapshot));
    }
    if advisor {
        app.quick_actions().request_advisor();
    }
    Ok(())
}

pub fn render(snapshot: &FinancialSnapshot) -> String {
    let mut out = format!(
        "Net worth ${:.2}   Savings rate {}%   Credit score {}\n\nAccounts\n",
        snapshot.net_worth, snapshot.savings_rate, snapshot.credit_score
    );
    for account in &snapshot.accounts {
        out.push_str(&format!(
            "  {:<20} {:<11} {:>12.2}\n",
            account.name,
            format!("{:?}", account.account_type),
            account.balance
        ));
    }
    out.push_str("\nRecent transactions\n");
    for tx in &snapshot.transactions {
        out.push_str(&format!("  {:<22} {:>10.2}  {}\n", tx.description, tx.amount, tx.date));
    }
    out.push_str(&format!("\n{}\n", snapshot.insight));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use aura_backend::catalog;

    #[test]
    fn render_includes_accounts_and_insight() {
        let text = render(&catalog::financial_snapshot());
        assert!(text.starts_with("Net worth $78450.00"));
        assert!(text.contains("High-Yield Savings"));
        assert!(text.contains("-1800.00"));
        assert!(text.contains("Buy a House"));
    }
}
