/*!
# Production Batch Titles

The Crowdfunding contract stores only a free-text title. Production batches
carry their unit count inside it, as `"<Company> - <Product> (<Qty> pcs)"`,
and the client reads it back out.

This is a UI convention, not a contract field. A user-chosen title that happens
to contain `(N pcs)` is read as a batch of N units. Titles without the suffix
count as a single unit.
*/

/// Unit count assumed when the title carries no `(N pcs)` suffix
pub const DEFAULT_TOTAL_QUANTITY: u64 = 1;

const QUANTITY_UNIT: &str = "pcs";
const COMPANY_SEPARATOR: &str = " - ";

/// Structured form of a production batch title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductTitle {
    pub company: String,
    pub product: String,
    pub quantity: u64,
}

/// Build the on-chain title for a production batch
pub fn encode_title(company: &str, product: &str, quantity: u64) -> String {
    format!(
        "{}{}{} ({} {})",
        company, COMPANY_SEPARATOR, product, quantity, QUANTITY_UNIT
    )
}

/// Unit count from the first `(N pcs)` group, if any. `pcs` is matched without
/// regard to case and may be preceded by whitespace.
pub fn parse_total_quantity(title: &str) -> Option<u64> {
    find_quantity_suffix(title).map(|(_, quantity)| quantity)
}

/// Unit count with the single-unit fallback applied. Zero counts as unparseable.
pub fn total_quantity(title: &str) -> u64 {
    parse_total_quantity(title)
        .filter(|quantity| *quantity > 0)
        .unwrap_or(DEFAULT_TOTAL_QUANTITY)
}

/// Recover company, product and quantity from a title built by [`encode_title`]
pub fn parse_title(title: &str) -> Option<ProductTitle> {
    let (start, quantity) = find_quantity_suffix(title)?;
    let (company, product) = title[..start].trim_end().split_once(COMPANY_SEPARATOR)?;

    Some(ProductTitle {
        company: company.trim().to_string(),
        product: product.trim().to_string(),
        quantity,
    })
}

/// Byte offset of the opening parenthesis and the parsed count
fn find_quantity_suffix(title: &str) -> Option<(usize, u64)> {
    title.match_indices('(').find_map(|(start, _)| {
        let rest = &title[start + 1..];
        let digits = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
        if digits == 0 {
            return None;
        }
        let quantity: u64 = rest[..digits].parse().ok()?;

        let tail = rest[digits..].trim_start();
        let unit = tail.get(..QUANTITY_UNIT.len())?;
        if !unit.eq_ignore_ascii_case(QUANTITY_UNIT) {
            return None;
        }
        if !tail[QUANTITY_UNIT.len()..].starts_with(')') {
            return None;
        }

        Some((start, quantity))
    })
}
