use std::sync::Arc;

use chanlog_core::{ChannelLevel, Error, Result, Severity};

/// Longest channel name kept, in bytes. Longer names are truncated.
pub const MAX_CHANNEL_LEN: usize = 15;

/// Smallest bucket count of a dynamic table.
pub const MIN_DYNAMIC_CAPACITY: usize = 8;

/// Growth policy of a [`ChannelTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacityPolicy {
    /// Starts with `max(initial, 8)` buckets and doubles when full.
    Dynamic { initial: usize },
    /// Exactly this many channels, all slots reserved up front. Lookups of
    /// new channels fail once the table is full.
    Fixed(usize),
}

impl Default for CapacityPolicy {
    fn default() -> Self {
        CapacityPolicy::Dynamic {
            initial: MIN_DYNAMIC_CAPACITY,
        }
    }
}

/// A registered channel: its (truncated) name and level.
#[derive(Debug)]
pub struct LiteChannel {
    name: String,
    pub(crate) level: ChannelLevel,
}

impl LiteChannel {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> Severity {
        self.level.get()
    }
}

/// Cuts `name` to at most [`MAX_CHANNEL_LEN`] bytes on a char boundary.
pub fn truncate_channel(name: &str) -> &str {
    if name.len() <= MAX_CHANNEL_LEN {
        return name;
    }
    let mut end = MAX_CHANNEL_LEN;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    &name[..end]
}

// Bernstein: h = h * 33 ^ byte
fn hash(key: &str) -> usize {
    key.bytes().fold(5381usize, |h, b| h.wrapping_add(h << 5) ^ usize::from(b))
}

struct Node {
    channel: Arc<LiteChannel>,
    next: Option<usize>,
}

/// Chained hash table over an arena of nodes.
///
/// `buckets[i]` is the head of a chain of indices into `nodes`; the number of
/// buckets is the capacity. Nodes are never removed individually.
pub struct ChannelTable {
    policy: CapacityPolicy,
    buckets: Vec<Option<usize>>,
    nodes: Vec<Node>,
    default_level: Severity,
}

impl ChannelTable {
    pub fn new(policy: CapacityPolicy, default_level: Severity) -> Result<Self> {
        let capacity = match policy {
            CapacityPolicy::Fixed(0) => return Err(Error::ZeroCapacity),
            CapacityPolicy::Fixed(capacity) => capacity,
            CapacityPolicy::Dynamic { initial } => initial.max(MIN_DYNAMIC_CAPACITY),
        };
        let mut buckets = Vec::new();
        let mut nodes = Vec::new();
        buckets
            .try_reserve_exact(capacity)
            .and_then(|()| nodes.try_reserve_exact(capacity))
            .map_err(|_| Error::AllocationFailed { capacity })?;
        buckets.resize(capacity, None);
        Ok(Self {
            policy,
            buckets,
            nodes,
            default_level,
        })
    }

    pub fn policy(&self) -> CapacityPolicy {
        self.policy
    }

    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn find(&self, key: &str) -> Option<usize> {
        let mut cursor = self.buckets[hash(key) % self.capacity()];
        while let Some(index) = cursor {
            let node = &self.nodes[index];
            if node.channel.name == key {
                return Some(index);
            }
            cursor = node.next;
        }
        None
    }

    pub fn get(&self, name: &str) -> Option<Arc<LiteChannel>> {
        self.find(truncate_channel(name))
            .map(|index| Arc::clone(&self.nodes[index].channel))
    }

    /// Existing channel, or a new one at the table's default level.
    pub fn get_or_insert(&mut self, name: &str) -> Result<Arc<LiteChannel>> {
        let level = self.default_level;
        self.get_or_insert_at(name, level)
    }

    /// Existing channel untouched, or a new one at `level`.
    pub fn get_or_insert_at(&mut self, name: &str, level: Severity) -> Result<Arc<LiteChannel>> {
        let key = truncate_channel(name);
        if let Some(index) = self.find(key) {
            return Ok(Arc::clone(&self.nodes[index].channel));
        }
        if self.nodes.len() >= self.capacity() {
            match self.policy {
                CapacityPolicy::Fixed(capacity) => {
                    return Err(Error::CapacityExhausted { capacity });
                }
                CapacityPolicy::Dynamic { .. } => self.grow(),
            }
        }
        let channel = Arc::new(LiteChannel {
            name: key.to_owned(),
            level: ChannelLevel::new(level),
        });
        let bucket = hash(key) % self.capacity();
        let index = self.nodes.len();
        self.nodes.push(Node {
            channel: Arc::clone(&channel),
            next: self.buckets[bucket],
        });
        self.buckets[bucket] = Some(index);
        Ok(channel)
    }

    fn grow(&mut self) {
        let capacity = self.capacity() * 2;
        log::debug!(target: "chanlog", "growing channel table to {capacity} buckets");
        self.buckets = vec![None; capacity];
        for index in 0..self.nodes.len() {
            let bucket = hash(&self.nodes[index].channel.name) % capacity;
            self.nodes[index].next = self.buckets[bucket];
            self.buckets[bucket] = Some(index);
        }
    }
}
