//! Rendering of `gerarorcamentofinanceirogrid` SOAP envelopes.
//!
//! The request shape is fixed and flat, so the envelope is written
//! directly; tag names are the ones the service defines.

use crate::config::{AccessConfig, ImportConfig};
use crate::core::budget::{BudgetLine, REQUIRED_COLUMNS};

const NS_SOAP: &str = "http://schemas.xmlsoap.org/soap/envelope/";
const NS_SERVICE: &str = "http://services.senior.com.br";

/// Renders one batch of budget lines as a SOAP request.
pub fn render(access: &AccessConfig, import: &ImportConfig, lines: &[BudgetLine]) -> Vec<u8> {
    let mut xml = String::with_capacity(512 + lines.len() * 256);

    xml.push_str(r#"<?xml version="1.0" encoding="utf-8"?>"#);
    xml.push_str(&format!(
        r#"<soapenv:Envelope xmlns:soapenv="{NS_SOAP}" xmlns:ser="{NS_SERVICE}">"#
    ));
    xml.push_str("<soapenv:Body><ser:gerarorcamentofinanceirogrid>");

    let password = access.password.as_deref().unwrap_or("");
    for (tag, value) in [
        ("user", access.user.as_str()),
        ("password", password),
        ("encryption", import.encryption.as_str()),
        ("tipOpe", import.operation_type.as_str()),
        ("codEmp", access.company.as_str()),
        ("lctSup", import.post_to_parents.as_str()),
        ("recalculaTotalizadores", import.recalculate_totals.as_str()),
    ] {
        push_element(&mut xml, tag, value);
    }

    xml.push_str("<orcamentoFinanceiroLista>");
    for line in lines {
        xml.push_str("<orcamentoFinanceiroLista>");
        for (tag, value) in REQUIRED_COLUMNS.iter().zip(line.wire_values()) {
            push_element(&mut xml, tag, &value);
        }
        xml.push_str("</orcamentoFinanceiroLista>");
    }
    xml.push_str("</orcamentoFinanceiroLista>");

    xml.push_str("</ser:gerarorcamentofinanceirogrid></soapenv:Body></soapenv:Envelope>");
    xml.into_bytes()
}

fn push_element(xml: &mut String, tag: &str, value: &str) {
    xml.push('<');
    xml.push_str(tag);
    xml.push('>');
    xml.push_str(&escape(value));
    xml.push_str("</");
    xml.push_str(tag);
    xml.push('>');
}

/// Escapes text content for XML.
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
