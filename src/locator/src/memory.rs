use crate::corpus::{Corpus, MethodId};
use crate::descriptor::MethodDescriptor;
use crate::signature::StringMatch;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to read corpus dump {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed corpus dump: {0}")]
    Malformed(#[from] toml::de::Error),

    #[error("method {method} calls unknown method index {callee}")]
    DanglingCall { method: MethodDescriptor, callee: u32 },
}

/// One method of a corpus dump. `calls` holds indices of the methods it invokes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodEntry {
    pub class: String,
    pub name: String,
    #[serde(default)]
    pub params: Vec<String>,
    #[serde(default)]
    pub strings: Vec<String>,
    #[serde(default)]
    pub calls: Vec<u32>,
}

#[derive(Deserialize)]
struct CorpusFile {
    #[serde(default)]
    method: Vec<MethodEntry>,
}

struct Indexed {
    descriptor: MethodDescriptor,
    strings: HashSet<String>,
    callers: Vec<MethodId>,
}

/// Corpus held entirely in memory, built from method entries or a TOML dump.
pub struct InMemoryCorpus {
    methods: Vec<Indexed>,
}

impl MethodEntry {
    fn descriptor(&self) -> MethodDescriptor {
        MethodDescriptor::new(&*self.class, &*self.name, &self.params)
    }
}

impl InMemoryCorpus {
    pub fn new(entries: Vec<MethodEntry>) -> Result<Self, CorpusError> {
        let count = entries.len();
        let mut callers: Vec<Vec<MethodId>> = vec![Vec::new(); count];

        for (index, entry) in entries.iter().enumerate() {
            for &callee in &entry.calls {
                let Some(slot) = callers.get_mut(callee as usize) else {
                    return Err(CorpusError::DanglingCall {
                        method: entry.descriptor(),
                        callee,
                    });
                };

                let caller = MethodId(index as u32);
                if !slot.contains(&caller) {
                    slot.push(caller);
                }
            }
        }

        let methods = entries
            .into_iter()
            .zip(callers)
            .map(|(entry, callers)| Indexed {
                descriptor: entry.descriptor(),
                strings: entry.strings.into_iter().collect(),
                callers,
            })
            .collect();

        Ok(Self { methods })
    }

    pub fn from_toml(content: &str) -> Result<Self, CorpusError> {
        let file: CorpusFile = toml::from_str(content)?;
        Self::new(file.method)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CorpusError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| CorpusError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml(&content)
    }

    fn entry(&self, method: MethodId) -> &Indexed {
        &self.methods[method.0 as usize]
    }
}

impl Corpus for InMemoryCorpus {
    fn len(&self) -> usize {
        self.methods.len()
    }

    fn descriptor(&self, method: MethodId) -> &MethodDescriptor {
        &self.entry(method).descriptor
    }

    fn uses_string(&self, method: MethodId, wanted: &str, string_match: StringMatch) -> bool {
        let strings = &self.entry(method).strings;
        match string_match {
            StringMatch::Equals => strings.contains(wanted),
            StringMatch::Contains => strings
                .iter()
                .any(|literal| string_match.matches(literal, wanted)),
        }
    }

    fn callers(&self, method: MethodId) -> &[MethodId] {
        &self.entry(method).callers
    }
}
