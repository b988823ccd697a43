//! vCard 3.0 generation.
//!
//! [`render`] is a pure function from a profile to vCard text: no I/O, no
//! clock, byte-identical output for identical input. Transport concerns
//! (download vs inline, headers, filenames) belong to the HTTP layer.

use crate::models::Profile;

/// vCard 3.0 requires CRLF line endings.
const LINE_ENDING: &str = "\r\n";

/// Render a profile as a vCard 3.0 byte string.
///
/// Always emits `N` and `FN`. `ORG` and `TITLE` appear only when the company
/// or job title is set; one `TEL`/`EMAIL` line is emitted per phone or email
/// with a non-empty value. A missing or empty type label defaults to `WORK`.
#[must_use]
pub fn render(profile: &Profile) -> String {
    let mut vcf = String::new();

    push_line(&mut vcf, "BEGIN:VCARD");
    push_line(&mut vcf, "VERSION:3.0");

    let (given, family) = split_name(&profile.name);
    push_line(&mut vcf, &format!("N:{};{}", escape(family), escape(given)));
    push_line(&mut vcf, &format!("FN:{}", escape(&profile.name)));

    if let Some(company) = non_empty(profile.company.as_deref()) {
        push_line(&mut vcf, &format!("ORG:{}", escape(company)));
    }
    if let Some(job_title) = non_empty(profile.job_title.as_deref()) {
        push_line(&mut vcf, &format!("TITLE:{}", escape(job_title)));
    }

    for phone in &profile.phones {
        if !phone.number.is_empty() {
            push_line(
                &mut vcf,
                &format!(
                    "TEL;TYPE={}:{}",
                    type_param(phone.kind.as_deref()),
                    phone.number
                ),
            );
        }
    }

    for email in &profile.emails {
        if !email.address.is_empty() {
            push_line(
                &mut vcf,
                &format!(
                    "EMAIL;TYPE={}:{}",
                    type_param(email.kind.as_deref()),
                    email.address
                ),
            );
        }
    }

    push_line(&mut vcf, "END:VCARD");
    vcf
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push_str(LINE_ENDING);
}

/// Split a display name into (given, family).
///
/// The first whitespace-free token is the given name; the remainder, rejoined,
/// is the family name. An empty name yields empty components.
fn split_name(name: &str) -> (&str, &str) {
    match name.split_once(' ') {
        Some((given, family)) => (given, family),
        None => (name, ""),
    }
}

/// Uppercased TYPE parameter, defaulting to WORK when absent or empty.
fn type_param(kind: Option<&str>) -> String {
    match non_empty(kind) {
        Some(kind) => kind.to_uppercase(),
        None => "WORK".to_owned(),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    match value {
        Some(v) if !v.is_empty() => Some(v),
        _ => None,
    }
}

/// Escape a text value per vCard 3.0 (RFC 2426 §2.4.2).
///
/// Backslash first, then structural characters; raw newlines become `\n`.
fn escape(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace("\r\n", "\\n")
        .replace('\n', "\\n")
}
