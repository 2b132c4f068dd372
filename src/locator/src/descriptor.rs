use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Statically known method: declaring type, name and parameter types, all in source form
/// (`android.widget.SeekBar`, `int`, `android.os.Bundle`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodDescriptor {
    pub class: String,
    pub name: String,
    #[serde(default)]
    pub params: Vec<String>,
}

impl MethodDescriptor {
    pub fn new<C, N, P, S>(class: C, name: N, params: P) -> Self
    where
        C: Into<String>,
        N: Into<String>,
        P: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            class: class.into(),
            name: name.into(),
            params: params.into_iter().map(Into::into).collect(),
        }
    }
}

impl Display for MethodDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}({})", self.class, self.name, self.params.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let method = MethodDescriptor::new("a.b.C", "run", ["int", "java.lang.String"]);
        assert_eq!(method.to_string(), "a.b.C#run(int, java.lang.String)");

        let method = MethodDescriptor::new("a.b.C", "<init>", Vec::<String>::new());
        assert_eq!(method.to_string(), "a.b.C#<init>()");
    }
}
