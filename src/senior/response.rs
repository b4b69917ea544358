//! Interpretation of budget grid service responses.
//!
//! Senior deployments prefix response elements with varying namespaces, so
//! elements are matched by local name anywhere in the document, the same
//! way the service's own examples do.

use crate::core::submit::BatchOutcome;

/// Extracts the batch outcome from a response body.
pub fn parse(body: &str) -> BatchOutcome {
    let message = first_text(body, "mensagem").or_else(|| first_text(body, "faultstring"));

    BatchOutcome {
        result: first_text(body, "resultado"),
        execution_error: first_text(body, "erroExecucao"),
        message,
        grid_errors: all_texts(body, "msgErr"),
    }
}

/// Text content of the first element whose local name matches.
fn first_text(xml: &str, local_name: &str) -> Option<String> {
    element_texts(xml, local_name).into_iter().next()
}

/// Text content of every non-empty element with the local name.
fn all_texts(xml: &str, local_name: &str) -> Vec<String> {
    element_texts(xml, local_name)
}

fn element_texts(xml: &str, local_name: &str) -> Vec<String> {
    let mut texts = Vec::new();
    let mut rest = xml;

    while let Some(open) = rest.find('<') {
        rest = &rest[open + 1..];
        let Some(end) = rest.find('>') else { break };
        let tag = &rest[..end];
        rest = &rest[end + 1..];

        if tag.starts_with('/') || tag.starts_with('?') || tag.starts_with('!') {
            continue;
        }
        if tag.ends_with('/') {
            continue;
        }

        // Tag name runs up to the first attribute, local part after ':'
        let name = tag.split_whitespace().next().unwrap_or(tag);
        let local = name.rsplit(':').next().unwrap_or(name);
        if local != local_name {
            continue;
        }

        let Some(close) = rest.find('<') else { break };
        let text = unescape(rest[..close].trim());
        if !text.is_empty() {
            texts.push(text);
        }
    }

    texts
}

fn unescape(value: &str) -> String {
    value
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
