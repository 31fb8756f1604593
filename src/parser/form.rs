// Form type classification from extracted text.
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormType {
    Form1040,
    Form1040Sr,
    Form1040Nr,
    Form1040X,
}

impl FormType {
    pub fn label(&self) -> &'static str {
        match self {
            FormType::Form1040 => "1040",
            FormType::Form1040Sr => "1040-SR",
            FormType::Form1040Nr => "1040-NR",
            FormType::Form1040X => "1040-X",
        }
    }
}

impl fmt::Display for FormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Case-insensitive substring classification, in strict priority order.
/// Amended-return markers are checked first so they are never shadowed
/// by a generic "Form 1040" hit in the same boilerplate.
pub fn classify(text: &str) -> Option<FormType> {
    let upper = text.to_uppercase();

    if upper.contains("1040-X") || upper.contains("1040X") || upper.contains("AMENDED U.S. INDIVIDUAL")
    {
        return Some(FormType::Form1040X);
    }
    if upper.contains("1040-SR") || upper.contains("1040SR") {
        return Some(FormType::Form1040Sr);
    }
    if upper.contains("1040-NR") || upper.contains("1040NR") {
        return Some(FormType::Form1040Nr);
    }
    if upper.contains("FORM 1040") || upper.contains("U.S. INDIVIDUAL INCOME TAX RETURN") {
        return Some(FormType::Form1040);
    }

    None
}
