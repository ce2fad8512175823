use std::collections::HashMap;

pub type Nid = u64;

/// Interns node identifiers to dense u64 handles so the graph can index
/// adjacency by position instead of hashing strings on every lookup.
#[derive(Debug)]
pub struct NodeTable {
    str_to_id: HashMap<String, Nid>,
    id_to_str: Vec<String>,
}

impl NodeTable {
    pub fn new() -> Self {
        Self {
            str_to_id: HashMap::new(),
            id_to_str: Vec::new(),
        }
    }

    pub fn id(&self, s: &str) -> Option<Nid> {
        self.str_to_id.get(s).copied()
    }

    pub fn get_or_create_id(&mut self, s: &str) -> Nid {
        if let Some(id) = self.id(s) {
            return id;
        }

        let new_id = self.id_to_str.len() as Nid;
        self.str_to_id.insert(s.to_string(), new_id);
        self.id_to_str.push(s.to_string());
        new_id
    }

    pub fn name(&self, id: Nid) -> Option<&str> {
        self.id_to_str.get(id as usize).map(|s| s.as_str())
    }

    pub fn has(&self, s: &str) -> bool {
        self.str_to_id.contains_key(s)
    }

    pub fn len(&self) -> usize {
        self.id_to_str.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_str.is_empty()
    }
}

impl Default for NodeTable {
    fn default() -> Self {
        Self::new()
    }
}
