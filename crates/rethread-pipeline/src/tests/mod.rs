
/// A DOM element in the two-tier constructor style.
pub(super) const ELEMENT: &str = include_str!("../../tests/fixtures/htmldivelement.rs");

/// Builds an element whose outer constructor calls
/// `Base::new_inherited({outer_args})` and whose outer signature declares
/// `outer_params`.
pub(super) fn element(outer_params: &str, outer_args: &str) -> String {
    format!(
        r"impl Derived {{
    fn new_inherited(a: A, b: B) -> Derived {{
        Derived {{ base: Base::new_inherited(a, b) }}
    }}

    pub(crate) fn new({outer_params}) -> DomRoot<Derived> {{
        reflect(Box::new(Base::new_inherited({outer_args})))
    }}
}}
"
    )
}
