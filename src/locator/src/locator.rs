use crate::corpus::{Corpus, MethodId};
use crate::descriptor::MethodDescriptor;
use crate::signature::{MethodSignature, StringMatch};
use log::{debug, info};
use std::time::Instant;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocateError {
    #[error("no method matches signature ({signature})")]
    NotFound { signature: String },

    #[error("{} methods match signature ({signature}): {candidates:?}", .candidates.len())]
    Ambiguous {
        signature: String,
        candidates: Vec<String>,
    },
}

/// Handle to one corpus method. Borrows the corpus, which owns the metadata.
#[derive(Debug, Copy, Clone)]
pub struct LocatedMethod<'c> {
    pub id: MethodId,
    pub descriptor: &'c MethodDescriptor,
}

pub struct Locator<'c, C: Corpus + ?Sized> {
    corpus: &'c C,
}

impl<'c, C: Corpus + ?Sized> Locator<'c, C> {
    pub fn new(corpus: &'c C) -> Self {
        Self { corpus }
    }

    fn uses_all(&self, method: MethodId, strings: &[String], string_match: StringMatch) -> bool {
        strings
            .iter()
            .all(|wanted| self.corpus.uses_string(method, wanted, string_match))
    }

    fn matches(&self, method: MethodId, signature: &MethodSignature) -> bool {
        let string_match = signature.string_match;
        if !self.uses_all(method, &signature.self_strings, string_match) {
            return false;
        }

        if signature.caller_strings.is_empty() {
            return true;
        }

        self.corpus
            .callers(method)
            .iter()
            .any(|&caller| self.uses_all(caller, &signature.caller_strings, string_match))
    }

    /// Every method satisfying the signature, in corpus order.
    pub fn find(&self, signature: &MethodSignature) -> Vec<LocatedMethod<'c>> {
        let started = Instant::now();

        let found: Vec<_> = (0..self.corpus.len() as u32)
            .map(MethodId)
            .filter(|&method| self.matches(method, signature))
            .map(|id| LocatedMethod {
                id,
                descriptor: self.corpus.descriptor(id),
            })
            .collect();

        debug!(
            "scanned {} methods in {:?}, {} match ({signature})",
            self.corpus.len(),
            started.elapsed(),
            found.len()
        );

        found
    }

    /// The single method satisfying the signature. Zero or several matches are an error,
    /// the locator never picks among candidates.
    pub fn find_unique(
        &self,
        signature: &MethodSignature,
    ) -> Result<LocatedMethod<'c>, LocateError> {
        let mut found = self.find(signature);

        match found.len() {
            0 => Err(LocateError::NotFound {
                signature: signature.to_string(),
            }),
            1 => {
                let method = found.remove(0);
                info!("located {} for ({signature})", method.descriptor);
                Ok(method)
            }
            _ => Err(LocateError::Ambiguous {
                signature: signature.to_string(),
                candidates: found
                    .iter()
                    .map(|method| method.descriptor.to_string())
                    .collect(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{InMemoryCorpus, MethodEntry};

    fn entry(name: &str, strings: &[&str], calls: &[u32]) -> MethodEntry {
        MethodEntry {
            class: "x.y".into(),
            name: name.into(),
            params: vec!["java.lang.String".into()],
            strings: strings.iter().map(|s| s.to_string()).collect(),
            calls: calls.to_vec(),
        }
    }

    fn resolution_signature() -> MethodSignature {
        MethodSignature::new()
            .using_strings(["User-Agent"])
            .caller_using_strings(["&y="])
    }

    #[test]
    fn finds_by_self_and_caller_strings() {
        let corpus = InMemoryCorpus::new(vec![
            entry("target", &["User-Agent", "Accept"], &[]),
            entry("decoy", &["User-Agent"], &[]),
            entry("builder", &["&x=", "&y="], &[0]),
            entry("other", &["&x="], &[1]),
        ])
        .unwrap();

        let locator = Locator::new(&corpus);
        let method = locator.find_unique(&resolution_signature()).unwrap();

        assert_eq!(method.id, MethodId(0));
        assert_eq!(method.descriptor.name, "target");
    }

    #[test]
    fn caller_must_use_every_caller_string() {
        let corpus = InMemoryCorpus::new(vec![
            entry("target", &["User-Agent"], &[]),
            entry("half", &["&y="], &[0]),
        ])
        .unwrap();

        let signature = resolution_signature().caller_using_strings(["&x="]);
        assert!(Locator::new(&corpus).find(&signature).is_empty());
    }

    #[test]
    fn strings_match_inside_longer_literals() {
        let corpus = InMemoryCorpus::new(vec![
            entry("target", &["User-Agent"], &[]),
            entry("builder", &["&x=", "&y=%d&fps="], &[0]),
        ])
        .unwrap();

        let locator = Locator::new(&corpus);
        assert_eq!(locator.find(&resolution_signature()).len(), 1);

        let exact = resolution_signature().string_match(StringMatch::Equals);
        assert!(locator.find(&exact).is_empty());
    }

    #[test]
    fn empty_caller_set_needs_no_callers() {
        let corpus = InMemoryCorpus::new(vec![entry("lonely", &["User-Agent"], &[])]).unwrap();

        let signature = MethodSignature::new().using_strings(["User-Agent"]);
        assert_eq!(Locator::new(&corpus).find(&signature).len(), 1);
    }

    #[test]
    fn no_match_is_not_found() {
        let corpus = InMemoryCorpus::new(vec![entry("a", &["Accept"], &[])]).unwrap();

        assert!(matches!(
            Locator::new(&corpus).find_unique(&resolution_signature()),
            Err(LocateError::NotFound { .. })
        ));
    }

    #[test]
    fn several_matches_are_ambiguous() {
        let corpus = InMemoryCorpus::new(vec![
            entry("first", &["User-Agent"], &[]),
            entry("second", &["User-Agent"], &[]),
            entry("builder", &["&y="], &[0, 1]),
        ])
        .unwrap();

        let Err(LocateError::Ambiguous { candidates, .. }) =
            Locator::new(&corpus).find_unique(&resolution_signature())
        else {
            panic!("expected an ambiguous result");
        };

        assert_eq!(candidates.len(), 2);
    }
}
