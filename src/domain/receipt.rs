use super::{compute_total, format_amount, Account, Amount, Expense};

/// Width of the dashed rule separating the receipt sections.
const RULE_WIDTH: usize = 53;

/// Printable receipt projection for one account: the account name, one line
/// per owned expense in storage order, and the aggregate total.
#[derive(Debug, Clone)]
pub struct Receipt {
    pub account_name: String,
    pub lines: Vec<ReceiptLine>,
    pub total: Amount,
}

#[derive(Debug, Clone)]
pub struct ReceiptLine {
    pub date: String,
    pub description: String,
    pub amount: Amount,
}

impl Receipt {
    /// Build the receipt projection for an account and its expenses.
    pub fn new(account: &Account, expenses: &[Expense]) -> Self {
        let lines = expenses
            .iter()
            .map(|e| ReceiptLine {
                date: e.date.clone(),
                description: e.description.clone(),
                amount: e.amount,
            })
            .collect();

        Self {
            account_name: account.name.clone(),
            lines,
            total: compute_total(expenses),
        }
    }

    /// Render the receipt as fixed-width text: a header with the account
    /// name, `Date / Description / Amount` columns between dashed rules, and
    /// a trailing total line rounded to two decimals.
    pub fn render(&self) -> String {
        let mut out = String::new();

        out.push_str("EXPENSE RECEIPT\n\n");
        out.push_str(&format!("Account: {}\n\n", self.account_name));
        out.push_str(&format!(
            "{:<12} {:<25} {}\n",
            "Date", "Description", "Amount"
        ));
        out.push_str(&"-".repeat(RULE_WIDTH));
        out.push('\n');

        for line in &self.lines {
            out.push_str(&format!(
                "{:<12} {:<25} {}\n",
                line.date,
                line.description,
                format_amount(line.amount)
            ));
        }

        out.push_str(&"-".repeat(RULE_WIDTH));
        out.push('\n');
        out.push_str(&format!("Total: {}", format_amount(self.total)));

        out
    }
}
