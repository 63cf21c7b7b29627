use conlearn_helpers::Category;
use log::debug;
use std::fmt::{Display, Formatter};

/// A single equality test `attribute == value`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde_crate::Serialize, serde_crate::Deserialize),
    serde(crate = "serde_crate")
)]
pub struct Literal<V> {
    pub attribute: String,
    pub value: V,
}

/// A conjunction of equality literals, i.e. an ordered attribute → value mapping.
///
/// Attributes that do not appear are unconstrained. The empty conjunction is the
/// universal hypothesis and covers every example.
///
/// Literals keep the order in which they were first inserted, which for induced
/// hypotheses is the column order of the training data.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde_crate::Serialize, serde_crate::Deserialize),
    serde(crate = "serde_crate")
)]
pub struct Conjunction<V> {
    literals: Vec<Literal<V>>,
}

impl<V> Conjunction<V>
where
    V: Category,
{
    /// The always-true conjunction with no literals.
    pub fn universal() -> Self {
        Self {
            literals: Vec::new(),
        }
    }

    /// Builds a conjunction from `(attribute, value)` pairs.
    ///
    /// A repeated attribute keeps its position and takes the later value.
    pub fn from_pairs<S, I>(pairs: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, V)>,
    {
        let mut conjunction = Self::universal();
        for (attribute, value) in pairs {
            conjunction.insert(attribute, value);
        }
        conjunction
    }

    /// Sets `attribute == value`, replacing any previous value for `attribute`.
    pub fn insert<S: Into<String>>(&mut self, attribute: S, value: V) {
        let attribute = attribute.into();
        match self.literals.iter_mut().find(|l| l.attribute == attribute) {
            Some(literal) => literal.value = value,
            None => self.literals.push(Literal { attribute, value }),
        }
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// True for the universal conjunction.
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn get(&self, attribute: &str) -> Option<&V> {
        self.literals
            .iter()
            .find(|l| l.attribute == attribute)
            .map(|l| &l.value)
    }

    pub fn literals(&self) -> &[Literal<V>] {
        &self.literals
    }

    pub fn attributes(&self) -> impl Iterator<Item = &str> + '_ {
        self.literals.iter().map(|l| l.attribute.as_str())
    }

    /// The literals as `(attribute, value)` pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &V)> + '_ {
        self.literals.iter().map(|l| (l.attribute.as_str(), &l.value))
    }

    /// Whether every literal of `self` also holds in `example`.
    ///
    /// An attribute missing from `example` counts as a mismatch.
    pub fn covers(&self, example: &Conjunction<V>) -> bool {
        self.covers_with(|attribute| example.get(attribute))
    }

    /// Row subsumption against any attribute lookup.
    pub fn covers_with<'a, F>(&self, lookup: F) -> bool
    where
        F: Fn(&str) -> Option<&'a V>,
        V: 'a,
    {
        self.literals
            .iter()
            .all(|l| lookup(l.attribute.as_str()) == Some(&l.value))
    }

    /// Least general generalization of `self` and `other`.
    ///
    /// Keeps exactly the literals of `self` that `other` shares with the same
    /// value. The result never gains attributes, and values come from `self`.
    pub fn generalize(&self, other: &Conjunction<V>) -> Conjunction<V> {
        let literals = self
            .literals
            .iter()
            .filter(|l| other.get(&l.attribute) == Some(&l.value))
            .cloned()
            .collect();
        Conjunction { literals }
    }
}

impl<'a, V> FromIterator<(&'a str, &'a V)> for Conjunction<V>
where
    V: Category + 'a,
{
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a V)>>(iter: I) -> Self {
        Self::from_pairs(iter.into_iter().map(|(a, v)| (a, v.clone())))
    }
}

impl<V> Display for Conjunction<V>
where
    V: Category,
{
    /// Renders `attr1 = val1 ∧ attr2 = val2`, or `⊤` for the universal conjunction.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "⊤");
        }
        let parts: Vec<String> = self
            .literals
            .iter()
            .map(|l| format!("{} = {}", l.attribute, l.value))
            .collect();
        write!(f, "{}", parts.join(" ∧ "))
    }
}

/// LGG of two conjunctions. See [`Conjunction::generalize`].
pub fn lgg_conjunction<V: Category>(h: &Conjunction<V>, x: &Conjunction<V>) -> Conjunction<V> {
    h.generalize(x)
}

/// Folds [`lgg_conjunction`] over a sequence of examples.
///
/// The first example seeds the hypothesis, every following one generalizes it.
/// Returns `None` when `examples` is empty.
pub fn lgg_set<V, I>(examples: I) -> Option<Conjunction<V>>
where
    V: Category,
    I: IntoIterator<Item = Conjunction<V>>,
{
    let mut examples = examples.into_iter();
    let mut hypothesis = examples.next()?;

    for (i, x) in examples.enumerate() {
        let before = hypothesis.len();
        hypothesis = lgg_conjunction(&hypothesis, &x);
        debug!(
            "Example {}: {} -> {} literals",
            i + 1,
            before,
            hypothesis.len()
        );
        // Nothing left to drop
        if hypothesis.is_empty() {
            break;
        }
    }
    Some(hypothesis)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mail(has_link: u8, has_attachment: u8) -> Conjunction<u8> {
        Conjunction::from_pairs([("has_link", has_link), ("has_attachment", has_attachment)])
    }

    #[test]
    fn test_generalize_drops_disagreeing_attributes() {
        let h = mail(1, 0);
        let x = mail(1, 1);
        let z = lgg_conjunction(&h, &x);
        assert_eq!(z, Conjunction::from_pairs([("has_link", 1u8)]));
    }

    #[test]
    fn test_generalize_drops_attributes_missing_from_other() {
        let h = mail(1, 0);
        let x = Conjunction::from_pairs([("has_attachment", 0u8)]);
        assert_eq!(h.generalize(&x), Conjunction::from_pairs([("has_attachment", 0u8)]));
    }

    #[test]
    fn test_generalize_never_reintroduces_attributes() {
        let h = Conjunction::from_pairs([("has_link", 1u8)]);
        let x = mail(1, 1);
        let z = h.generalize(&x);
        assert_eq!(z.attributes().collect::<Vec<_>>(), vec!["has_link"]);
    }

    #[test]
    fn test_generalize_to_universal() {
        let z = mail(1, 0).generalize(&mail(0, 1));
        assert!(z.is_empty());
        assert!(z.covers(&mail(0, 0)));
        assert_eq!(z.to_string(), "⊤");
    }

    #[test]
    fn test_lgg_set_single_example_is_unchanged() {
        let h = lgg_set(vec![mail(1, 1)]).unwrap();
        assert_eq!(h, mail(1, 1));
    }

    #[test]
    fn test_lgg_set_empty_input() {
        assert!(lgg_set(Vec::<Conjunction<u8>>::new()).is_none());
    }

    #[test]
    fn test_lgg_set_folds_all_examples() {
        let h = lgg_set(vec![mail(1, 0), mail(1, 0), mail(1, 1)]).unwrap();
        assert_eq!(h, Conjunction::from_pairs([("has_link", 1u8)]));
    }

    #[test]
    fn test_covers() {
        let h = Conjunction::from_pairs([("has_link", 1u8)]);
        assert!(h.covers(&mail(1, 0)));
        assert!(h.covers(&mail(1, 1)));
        assert!(!h.covers(&mail(0, 1)));
        assert!(!h.covers(&Conjunction::from_pairs([("has_attachment", 1u8)])));
    }

    #[test]
    fn test_insert_replaces_value_in_place() {
        let mut h = mail(1, 0);
        h.insert("has_link", 0);
        assert_eq!(h.literals()[0].attribute, "has_link");
        assert_eq!(h.get("has_link"), Some(&0));
        assert_eq!(h.len(), 2);
    }

    #[test]
    fn test_display_follows_literal_order() {
        assert_eq!(mail(1, 0).to_string(), "has_link = 1 ∧ has_attachment = 0");
    }

    #[test]
    fn test_from_record_iterator() {
        let record = vec![("a", &1u8), ("b", &0u8)];
        let h: Conjunction<u8> = record.into_iter().collect();
        assert_eq!(h, Conjunction::from_pairs([("a", 1u8), ("b", 0)]));
    }
}
