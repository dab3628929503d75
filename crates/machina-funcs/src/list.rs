//! The list function family. Indices are 1-based, as in the surface
//! language.

use machina_storage::{
    Element, FunctionClass, FunctionElement, Signature, ELEMENT_BACKGROUND, LIST_BACKGROUND,
    NUMBER_BACKGROUND,
};

/// `setnth(list, n, e)` — a new list with position `n` holding `e`.
///
/// `n` must be a natural number in `[1, length + 1]`; `length + 1`
/// appends. The input list is never modified.
pub struct SetNthFn {
    sig: Signature,
}

impl SetNthFn {
    pub fn new() -> Self {
        Self {
            sig: Signature::new(
                [LIST_BACKGROUND, NUMBER_BACKGROUND, ELEMENT_BACKGROUND],
                LIST_BACKGROUND,
            ),
        }
    }
}

impl Default for SetNthFn {
    fn default() -> Self {
        Self::new()
    }
}

impl FunctionElement for SetNthFn {
    fn name(&self) -> &str {
        "setnth"
    }

    fn fclass(&self) -> FunctionClass {
        FunctionClass::Derived
    }

    fn signature(&self) -> Option<&Signature> {
        Some(&self.sig)
    }

    fn value(&self, args: &[Element]) -> Element {
        let [list, index, item] = args else {
            return Element::Undef;
        };
        let (Some(list), Some(n)) = (list.as_list(), index.as_natural()) else {
            return Element::Undef;
        };
        if item.is_undef() || n < 1 || n > list.len() + 1 {
            return Element::Undef;
        }
        let mut items = list.items().to_vec();
        if n == list.len() + 1 {
            items.push(item.clone());
        } else {
            items[n - 1] = item.clone();
        }
        Element::list(items)
    }
}

/// `nth(list, n)` — the element at position `n`, or `undef` when out of
/// range.
pub struct NthFn {
    sig: Signature,
}

impl NthFn {
    pub fn new() -> Self {
        Self {
            sig: Signature::new([LIST_BACKGROUND, NUMBER_BACKGROUND], ELEMENT_BACKGROUND),
        }
    }
}

impl Default for NthFn {
    fn default() -> Self {
        Self::new()
    }
}

impl FunctionElement for NthFn {
    fn name(&self) -> &str {
        "nth"
    }

    fn fclass(&self) -> FunctionClass {
        FunctionClass::Derived
    }

    fn signature(&self) -> Option<&Signature> {
        Some(&self.sig)
    }

    fn value(&self, args: &[Element]) -> Element {
        let [list, index] = args else {
            return Element::Undef;
        };
        let (Some(list), Some(n)) = (list.as_list(), index.as_natural()) else {
            return Element::Undef;
        };
        if n < 1 {
            return Element::Undef;
        }
        list.get(n - 1).cloned().unwrap_or(Element::Undef)
    }
}

/// `take(list, n)` — a new list of the first `n` elements (all of them
/// when `n` exceeds the length).
pub struct TakeFn {
    sig: Signature,
}

impl TakeFn {
    pub fn new() -> Self {
        Self {
            sig: Signature::new([LIST_BACKGROUND, NUMBER_BACKGROUND], LIST_BACKGROUND),
        }
    }
}

impl Default for TakeFn {
    fn default() -> Self {
        Self::new()
    }
}

impl FunctionElement for TakeFn {
    fn name(&self) -> &str {
        "take"
    }

    fn fclass(&self) -> FunctionClass {
        FunctionClass::Derived
    }

    fn signature(&self) -> Option<&Signature> {
        Some(&self.sig)
    }

    fn value(&self, args: &[Element]) -> Element {
        let [list, count] = args else {
            return Element::Undef;
        };
        let (Some(list), Some(n)) = (list.as_list(), count.as_natural()) else {
            return Element::Undef;
        };
        let n = n.min(list.len());
        Element::list(list.items()[..n].to_vec())
    }
}

/// `drop(list, n)` — a new list without the first `n` elements.
pub struct DropFn {
    sig: Signature,
}

impl DropFn {
    pub fn new() -> Self {
        Self {
            sig: Signature::new([LIST_BACKGROUND, NUMBER_BACKGROUND], LIST_BACKGROUND),
        }
    }
}

impl Default for DropFn {
    fn default() -> Self {
        Self::new()
    }
}

impl FunctionElement for DropFn {
    fn name(&self) -> &str {
        "drop"
    }

    fn fclass(&self) -> FunctionClass {
        FunctionClass::Derived
    }

    fn signature(&self) -> Option<&Signature> {
        Some(&self.sig)
    }

    fn value(&self, args: &[Element]) -> Element {
        let [list, count] = args else {
            return Element::Undef;
        };
        let (Some(list), Some(n)) = (list.as_list(), count.as_natural()) else {
            return Element::Undef;
        };
        let n = n.min(list.len());
        Element::list(list.items()[n..].to_vec())
    }
}

/// `reverse(list)` — a new list in reverse order.
pub struct ReverseFn {
    sig: Signature,
}

impl ReverseFn {
    pub fn new() -> Self {
        Self {
            sig: Signature::new([LIST_BACKGROUND], LIST_BACKGROUND),
        }
    }
}

impl Default for ReverseFn {
    fn default() -> Self {
        Self::new()
    }
}

impl FunctionElement for ReverseFn {
    fn name(&self) -> &str {
        "reverse"
    }

    fn fclass(&self) -> FunctionClass {
        FunctionClass::Derived
    }

    fn signature(&self) -> Option<&Signature> {
        Some(&self.sig)
    }

    fn value(&self, args: &[Element]) -> Element {
        let [list] = args else {
            return Element::Undef;
        };
        let Some(list) = list.as_list() else {
            return Element::Undef;
        };
        let mut items = list.items().to_vec();
        items.reverse();
        Element::list(items)
    }
}
