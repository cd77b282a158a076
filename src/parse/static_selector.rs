use std::sync::OnceLock;

use scraper::Selector;

/// A CSS selector that is compiled the first time it is dereferenced.
#[derive(Debug)]
pub struct StaticSelector {
    cell: OnceLock<Selector>,
    source: &'static str,
}

impl StaticSelector {
    pub const fn new(source: &'static str) -> Self {
        Self {
            cell: OnceLock::new(),
            source,
        }
    }

    pub const fn source(&self) -> &'static str {
        self.source
    }
}

impl core::ops::Deref for StaticSelector {
    type Target = Selector;

    fn deref(&self) -> &Self::Target {
        // selectors are literals in this crate, so a bad one is a programming error
        self.cell.get_or_init(|| match Selector::parse(self.source) {
            Ok(sel) => sel,
            Err(e) => panic!("Error parsing static selector {}: {:?}", self.source, e),
        })
    }
}

#[macro_export]
macro_rules! static_selector {
    ($x: ident <- $sel: literal) => {
        static $x: $crate::parse::static_selector::StaticSelector =
            $crate::parse::static_selector::StaticSelector::new($sel);
    };
}
