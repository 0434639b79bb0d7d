use roxmltree::{Document, Node};
use tracing::{debug, trace};

use crate::models::Record;

/// Entry kinds searched for an `account`, in precedence order.
const ENTRY_TYPES: [&str; 2] = ["debit_entry", "credit_entry"];

/// Flattens every `operation` element of a parsed clearing document into a `Record`.
///
/// All element lookups are qualified by `namespace`. Operations are collected from anywhere
/// below the root element in document order. Absent elements become `None`; a present element
/// without text becomes `Some("")`. The document is never rejected here: a tree with no matching
/// elements simply yields an empty vector.
pub fn extract(document: &Document, namespace: &str) -> Vec<Record> {
    let root = document.root_element();

    let records: Vec<Record> = root.descendants()
        .filter(|node| node.id() != root.id() && is_element(node, namespace, "operation"))
        .enumerate()
        .map(|(index, operation)| {
            let record = extract_operation(operation, namespace);
            let populated = record.values().iter().flatten().count();
            trace!("Operation [{index}] populated [{populated}] of [{}] columns", Record::COLUMNS.len());
            record
        })
        .collect();

    debug!("Extracted [{}] operation records", records.len());

    records
}

fn extract_operation(operation: Node, namespace: &str) -> Record {
    let text = |name: &str| child_text(operation, namespace, name);

    let mut record = Record {
        oper_type: text("oper_type"),
        msg_type: text("msg_type"),
        sttl_type: text("sttl_type"),
        oper_date: text("oper_date"),
        acq_inst_bin: text("acq_inst_bin"),
        response_code: text("response_code"),
        is_reversal: text("is_reversal"),
        merchant_name: text("merchant_name"),
        merchant_country: text("merchant_country"),
        terminal_type: text("terminal_type"),
        ..Record::default()
    };

    if let Some(transaction) = child(operation, namespace, "transaction") {
        record.transaction_type = child_text(transaction, namespace, "transaction_type");
        record.amount_purpose = child_text(transaction, namespace, "amount_purpose");

        if let Some(account) = find_account(transaction, namespace) {
            record.account_number = child_text(account, namespace, "account_number");
            record.balance_type = child_text(account, namespace, "balance_type");
        }
    }

    if let Some(issuer) = child(operation, namespace, "issuer") {
        record.card_number = child_text(issuer, namespace, "card_number");
        record.card_country = child_text(issuer, namespace, "card_country");
        record.auth_code = child_text(issuer, namespace, "auth_code");
    }

    if let Some(oper_amount) = child(operation, namespace, "oper_amount") {
        record.currency = child_text(oper_amount, namespace, "currency");
    }

    record
}

/// Debit wins over credit: the first entry kind holding an `account` is the only one read.
/// Within a kind, every matching entry below the transaction is tried in document order.
fn find_account<'a, 'input>(transaction: Node<'a, 'input>, namespace: &str) -> Option<Node<'a, 'input>> {
    ENTRY_TYPES.iter().find_map(|entry_type| {
        let account = transaction.descendants()
            .filter(|node| is_element(node, namespace, entry_type))
            .find_map(|entry| child(entry, namespace, "account"));

        if account.is_some() {
            trace!("Account resolved from [{entry_type}]");
        }

        account
    })
}

fn child<'a, 'input>(parent: Node<'a, 'input>, namespace: &str, name: &str) -> Option<Node<'a, 'input>> {
    parent.children().find(|node| is_element(node, namespace, name))
}

fn child_text(parent: Node, namespace: &str, name: &str) -> Option<String> {
    child(parent, namespace, name).map(|node| node.text().unwrap_or_default().to_string())
}

fn is_element(node: &Node, namespace: &str, name: &str) -> bool {
    node.is_element() && node.has_tag_name((namespace, name))
}
