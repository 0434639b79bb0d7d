use serde::Serialize;

/// One flattened row per clearing `operation` element.
///
/// Every column is optional text. A fresh record starts all-null via `Default` and the
/// extractor fills in whatever it finds, so the column set never depends on the source shape.
/// Field order here is the output column order; serialization relies on it.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize)]
pub struct Record {
    pub oper_type: Option<String>,
    pub msg_type: Option<String>,
    pub sttl_type: Option<String>,
    pub oper_date: Option<String>,
    pub acq_inst_bin: Option<String>,
    pub response_code: Option<String>,
    pub is_reversal: Option<String>,
    pub merchant_name: Option<String>,
    pub merchant_country: Option<String>,
    pub terminal_type: Option<String>,
    /// From `transaction`.
    pub transaction_type: Option<String>,
    /// From the winning `debit_entry` / `credit_entry` account.
    pub account_number: Option<String>,
    pub balance_type: Option<String>,
    /// From `transaction`.
    pub amount_purpose: Option<String>,
    /// From `issuer`.
    pub card_number: Option<String>,
    pub card_country: Option<String>,
    pub auth_code: Option<String>,
    /// From `oper_amount`. Trails the declared list.
    pub currency: Option<String>
}

impl Record {
    pub const COLUMNS: [&'static str; 18] = [
        "oper_type",
        "msg_type",
        "sttl_type",
        "oper_date",
        "acq_inst_bin",
        "response_code",
        "is_reversal",
        "merchant_name",
        "merchant_country",
        "terminal_type",
        "transaction_type",
        "account_number",
        "balance_type",
        "amount_purpose",
        "card_number",
        "card_country",
        "auth_code",
        "currency"
    ];

    /// Column values in `COLUMNS` order.
    pub fn values(&self) -> [Option<&str>; 18] {
        [
            self.oper_type.as_deref(),
            self.msg_type.as_deref(),
            self.sttl_type.as_deref(),
            self.oper_date.as_deref(),
            self.acq_inst_bin.as_deref(),
            self.response_code.as_deref(),
            self.is_reversal.as_deref(),
            self.merchant_name.as_deref(),
            self.merchant_country.as_deref(),
            self.terminal_type.as_deref(),
            self.transaction_type.as_deref(),
            self.account_number.as_deref(),
            self.balance_type.as_deref(),
            self.amount_purpose.as_deref(),
            self.card_number.as_deref(),
            self.card_country.as_deref(),
            self.auth_code.as_deref(),
            self.currency.as_deref()
        ]
    }
}
