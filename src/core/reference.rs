//! Static CFPB reference data.
//!
//! The product list and bank list are only used to build the guidance
//! payload returned when a search comes back empty.

/// Product categories accepted by the CFPB `product` filter.
pub const PRODUCT_CATEGORIES: [&str; 10] = [
    "Checking or savings account",
    "Credit card",
    "Credit reporting or other personal consumer reports",
    "Debt collection",
    "Money transfer, virtual currency, or money service",
    "Mortgage",
    "Payday loan, title loan, or personal loan",
    "Vehicle loan or lease",
    "Student loan",
    "Other financial service",
];

/// Formal company names, exactly as they appear in the CFPB `company` field,
/// of the 20 largest banks.
pub const RECOGNIZED_BANKS: [&str; 20] = [
    "JPMorgan Chase Bank, N.A.",
    "Bank of America, N.A.",
    "Wells Fargo Bank, N.A.",
    "Citibank, N.A.",
    "U.S. Bank National Association",
    "PNC Bank N.A.",
    "Truist Bank",
    "Goldman Sachs Bank USA",
    "TD Bank, N.A.",
    "Capital One Bank (USA), N.A.",
    "Charles Schwab Bank, SSB",
    "Fifth Third Bank, National Association",
    "The Bank of New York Mellon",
    "State Street Bank and Trust Company",
    "BMO Bank N.A.",
    "Ally Bank",
    "Citizens Bank, N.A.",
    "Regions Bank",
    "KeyBank National Association",
    "Huntington National Bank",
];

/// Builds the explanatory note for a zero-result search.
///
/// The note names the usual causes and repeats both lists as bullets so a
/// text-only consumer (an LLM reading tool output) sees them inline.
#[must_use]
pub fn zero_result_note() -> String {
    let mut note = String::from(
        "The query produced zero results. This often happens when the bank name \
         is too casual or the product category is misidentified.\n\n\
         * Valid product categories:\n",
    );
    push_bullets(&mut note, &PRODUCT_CATEGORIES);
    note.push_str("\n* Top 20 formal bank names accepted by the CFPB:\n");
    push_bullets(&mut note, &RECOGNIZED_BANKS);
    note
}

fn push_bullets(out: &mut String, items: &[&str]) {
    for item in items {
        out.push_str("  - ");
        out.push_str(item);
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_sizes() {
        assert_eq!(PRODUCT_CATEGORIES.len(), 10);
        assert_eq!(RECOGNIZED_BANKS.len(), 20);
    }

    #[test]
    fn test_no_duplicate_banks() {
        let mut names = RECOGNIZED_BANKS.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), RECOGNIZED_BANKS.len());
    }

    #[test]
    fn test_note_lists_everything() {
        let note = zero_result_note();
        assert!(note.starts_with("The query produced zero results."));
        for product in PRODUCT_CATEGORIES {
            assert!(note.contains(&format!("  - {product}\n")));
        }
        for bank in RECOGNIZED_BANKS {
            assert!(note.contains(&format!("  - {bank}\n")));
        }
    }
}
