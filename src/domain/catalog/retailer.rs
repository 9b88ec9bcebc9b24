//! Fixed retailer catalog.

use serde::Serialize;

/// A retailer listings can be attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Retailer {
    pub id: &'static str,
    pub name: &'static str,
    pub logo: &'static str,
    /// Brand colour as `#RRGGBB`.
    pub color: &'static str,
}

impl Retailer {
    const fn new(
        id: &'static str,
        name: &'static str,
        logo: &'static str,
        color: &'static str,
    ) -> Self {
        Self {
            id,
            name,
            logo,
            color,
        }
    }

    /// Storefront search URL for a product name.
    pub fn search_url(&self, product_name: &str) -> String {
        let host: String = self
            .name
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        format!(
            "https://www.{}.com/search?q={}",
            host,
            encode_query_component(product_name)
        )
    }
}

static RETAILERS: [Retailer; 30] = [
    // Core ten, visible on every tier
    Retailer::new("amz", "Amazon", "https://logo.clearbit.com/amazon.com", "#FF9900"),
    Retailer::new("wmt", "Walmart", "https://logo.clearbit.com/walmart.com", "#0071CE"),
    Retailer::new("tgt", "Target", "https://logo.clearbit.com/target.com", "#CC0000"),
    Retailer::new("eby", "eBay", "https://logo.clearbit.com/ebay.com", "#E53238"),
    Retailer::new("bby", "Best Buy", "https://logo.clearbit.com/bestbuy.com", "#FFF200"),
    Retailer::new("cst", "Costco", "https://logo.clearbit.com/costco.com", "#005DAA"),
    Retailer::new("ult", "Ulta", "https://logo.clearbit.com/ulta.com", "#FF8A00"),
    Retailer::new("sph", "Sephora", "https://logo.clearbit.com/sephora.com", "#000000"),
    Retailer::new("ets", "Etsy", "https://logo.clearbit.com/etsy.com", "#F1641E"),
    Retailer::new("shn", "Shein", "https://logo.clearbit.com/shein.com", "#000000"),
    // Extended catalog
    Retailer::new("nke", "Nike", "https://logo.clearbit.com/nike.com", "#000000"),
    Retailer::new("adi", "Adidas", "https://logo.clearbit.com/adidas.com", "#000000"),
    Retailer::new("zps", "Zappos", "https://logo.clearbit.com/zappos.com", "#003953"),
    Retailer::new("nwg", "Newegg", "https://logo.clearbit.com/newegg.com", "#F58220"),
    Retailer::new("asf", "ASOS", "https://logo.clearbit.com/asos.com", "#000000"),
    Retailer::new("mac", "Macys", "https://logo.clearbit.com/macys.com", "#E21A2C"),
    Retailer::new("nord", "Nordstrom", "https://logo.clearbit.com/nordstrom.com", "#000000"),
    Retailer::new("h&m", "H&M", "https://logo.clearbit.com/hm.com", "#FF0000"),
    Retailer::new("zra", "Zara", "https://logo.clearbit.com/zara.com", "#000000"),
    Retailer::new("ftl", "Foot Locker", "https://logo.clearbit.com/footlocker.com", "#000000"),
    Retailer::new(
        "dsg",
        "Dicks Sporting Goods",
        "https://logo.clearbit.com/dickssportinggoods.com",
        "#BA0C2F",
    ),
    Retailer::new("way", "Wayfair", "https://logo.clearbit.com/wayfair.com", "#7F187F"),
    Retailer::new("hdp", "Home Depot", "https://logo.clearbit.com/homedepot.com", "#F96302"),
    Retailer::new("ovk", "Overstock", "https://logo.clearbit.com/overstock.com", "#C72027"),
    Retailer::new("ffh", "Farfetch", "https://logo.clearbit.com/farfetch.com", "#000000"),
    Retailer::new("rvl", "Revolve", "https://logo.clearbit.com/revolve.com", "#000000"),
    Retailer::new("lul", "Lululemon", "https://logo.clearbit.com/lululemon.com", "#D31145"),
    Retailer::new("bho", "Boohoo", "https://logo.clearbit.com/boohoo.com", "#000000"),
    Retailer::new(
        "plt",
        "PrettyLittleThing",
        "https://logo.clearbit.com/prettylittlething.com",
        "#FFB6C1",
    ),
    Retailer::new("temu", "Temu", "https://logo.clearbit.com/temu.com", "#FF7000"),
];

/// Every retailer, in catalog order.
pub fn all_retailers() -> &'static [Retailer] {
    &RETAILERS
}

/// Looks up a retailer by its catalog id.
pub fn retailer_by_id(id: &str) -> Option<&'static Retailer> {
    RETAILERS.iter().find(|r| r.id == id)
}

/// Attributes a generated store name to a catalog retailer.
///
/// Matching is a case-insensitive substring test in either direction and
/// returns the first catalog hit. Without a hit, the retailer at
/// `index % catalog size` is used, so every listing gets a retailer.
/// Overlapping names can pick the wrong retailer; matching is best-effort.
pub fn match_retailer(store_name: &str, index: usize) -> &'static Retailer {
    let needle = store_name.trim().to_lowercase();
    if !needle.is_empty() {
        if let Some(found) = RETAILERS.iter().find(|r| {
            let name = r.name.to_lowercase();
            name.contains(&needle) || needle.contains(&name)
        }) {
            return found;
        }
    }
    &RETAILERS[index % RETAILERS.len()]
}

/// Percent-encodes a query-string component (RFC 3986 unreserved set kept).
pub(crate) fn encode_query_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
