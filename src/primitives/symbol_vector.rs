//! Symbol vector primitive.

use super::GraphicPrimitive;

/// A named, reusable group of primitives anchored at a location.
///
/// Structurally richer than the other primitives: the body interleaves
/// preambles with primitive prefixes and ends with a name and a fixed
/// twelve-byte tail.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SymbolVector {
    pub loc_x: i16,
    pub loc_y: i16,
    pub name: String,
    pub primitives: Vec<GraphicPrimitive>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let v = SymbolVector::default();
        assert!(v.name.is_empty());
        assert!(v.primitives.is_empty());
    }
}
