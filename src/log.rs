use serde::{Deserialize, Serialize};

/// Ordered, human-readable history of what was done to a graph.
///
/// Threshold, prune, connect and mask operations append a line here so a
/// derived graph records how it was produced. The log travels with
/// [`Graph::clone`](crate::graph::Graph).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphLog {
    messages: Vec<String>,
}

impl GraphLog {
    pub fn add<T: Into<String>>(&mut self, message: T) {
        self.messages.push(message.into());
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}
