//! Abilities and the per-actor registry that holds them

use screenplay_core_types::AbilityKind;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

/// A capability binding an actor to an external resource.
///
/// Abilities are immutable once built. To point an actor at a different
/// resource, grant a new ability of the same kind.
pub trait Ability: Send + Sync + 'static {
    /// Human phrasing used in errors and traces ("browse the web").
    const NAME: &'static str;

    fn kind() -> AbilityKind
    where
        Self: Sized,
    {
        AbilityKind::of::<Self>(Self::NAME)
    }

    /// One-line description of the bound resource.
    fn summary(&self) -> String {
        Self::NAME.to_string()
    }
}

#[derive(Clone)]
struct Granted {
    kind: AbilityKind,
    handle: Arc<dyn Any + Send + Sync>,
    summary: String,
}

/// At most one live ability per kind.
#[derive(Clone, Default)]
pub struct AbilityRegistry {
    entries: HashMap<AbilityKind, Granted>,
}

impl AbilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant `ability`, replacing any held ability of the same kind.
    ///
    /// Returns `true` when an earlier ability was replaced.
    pub fn grant<A: Ability>(&mut self, ability: A) -> bool {
        self.grant_shared(Arc::new(ability))
    }

    /// Grant an ability that other actors may hold as well.
    pub fn grant_shared<A: Ability>(&mut self, ability: Arc<A>) -> bool {
        let kind = A::kind();
        let granted = Granted {
            kind,
            summary: ability.summary(),
            handle: ability,
        };
        self.entries.insert(kind, granted).is_some()
    }

    pub fn resolve<A: Ability>(&self) -> Option<Arc<A>> {
        self.entries
            .get(&A::kind())
            .and_then(|granted| granted.handle.clone().downcast::<A>().ok())
    }

    pub fn revoke<A: Ability>(&mut self) -> bool {
        self.entries.remove(&A::kind()).is_some()
    }

    pub fn contains(&self, kind: &AbilityKind) -> bool {
        self.entries.contains_key(kind)
    }

    /// Kinds among `required` that are not held, in the order given.
    pub fn missing(&self, required: &[AbilityKind]) -> Vec<AbilityKind> {
        required
            .iter()
            .filter(|kind| !self.contains(kind))
            .copied()
            .collect()
    }

    pub fn kinds(&self) -> Vec<AbilityKind> {
        let mut kinds: Vec<AbilityKind> = self.entries.values().map(|g| g.kind).collect();
        kinds.sort_by_key(|kind| kind.name());
        kinds
    }

    pub fn summaries(&self) -> Vec<String> {
        let mut summaries: Vec<String> = self.entries.values().map(|g| g.summary.clone()).collect();
        summaries.sort();
        summaries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrowseFake {
        session: &'static str,
    }

    impl Ability for BrowseFake {
        const NAME: &'static str = "browse the web";

        fn summary(&self) -> String {
            format!("browse the web with session {}", self.session)
        }
    }

    struct CallFake;

    impl Ability for CallFake {
        const NAME: &'static str = "call an API";
    }

    #[test]
    fn second_grant_of_a_kind_replaces_the_first() {
        let mut registry = AbilityRegistry::new();
        assert!(!registry.grant(BrowseFake { session: "first" }));
        assert!(registry.grant(BrowseFake { session: "second" }));

        assert_eq!(registry.len(), 1);
        let resolved = registry.resolve::<BrowseFake>().unwrap();
        assert_eq!(resolved.session, "second");
    }

    #[test]
    fn missing_lists_only_absent_kinds() {
        let mut registry = AbilityRegistry::new();
        registry.grant(CallFake);
        let missing = registry.missing(&[BrowseFake::kind(), CallFake::kind()]);
        assert_eq!(missing, vec![BrowseFake::kind()]);
        assert!(registry.resolve::<BrowseFake>().is_none());
    }

    #[test]
    fn shared_grants_point_at_the_same_instance() {
        let shared = Arc::new(BrowseFake { session: "shared" });
        let mut first = AbilityRegistry::new();
        let mut second = AbilityRegistry::new();
        first.grant_shared(shared.clone());
        second.grant_shared(shared.clone());

        let a = first.resolve::<BrowseFake>().unwrap();
        let b = second.resolve::<BrowseFake>().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn revoke_and_summaries() {
        let mut registry = AbilityRegistry::new();
        registry.grant(BrowseFake { session: "s1" });
        registry.grant(CallFake);
        assert_eq!(
            registry.summaries(),
            vec![
                "browse the web with session s1".to_string(),
                "call an API".to_string()
            ]
        );
        assert!(registry.revoke::<CallFake>());
        assert!(!registry.revoke::<CallFake>());
        assert_eq!(registry.kinds(), vec![BrowseFake::kind()]);
    }
}
