//! Whole-tree snapshots.
//!
//! A snapshot is the node graph flattened in pre-order: one record per node
//! holding its key, value, stored size, and whether it has a left and a
//! right child. Writing walks the tree with an explicit stack and reading
//! links the records back up the same way, so neither direction recurses
//! and a snapshot of any height can be loaded. The byte layout is `bincode`
//! over that record sequence and is not a compatibility contract.
//!
//! Restoring always runs [`RandomBst::verify`] on the rebuilt graph, so a
//! snapshot with inconsistent sizes or out-of-order keys is rejected rather
//! than turned into a broken tree. The random source is not part of a
//! snapshot; a restored tree gets a fresh one.
//!
//! # Examples
//!
//! ```rust
//! use randbst::RandomBst;
//! use randbst::snapshot::{restore, snapshot};
//!
//! let tree: RandomBst<u32, String> = (0..10).map(|key| (key, key.to_string())).collect();
//!
//! let bytes = snapshot(&tree).unwrap();
//! let restored: RandomBst<u32, String> = restore(&bytes).unwrap();
//!
//! assert_eq!(restored, tree);
//! assert_eq!(restored.height(), tree.height());
//! ```

use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::de::DeserializeOwned;
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ShapeError, SnapshotError};
use crate::tree::{Link, Node, RandomBst, dismantle};

// =============================================================================
// Record Encoding
// =============================================================================

/// One node as written: borrowed key and value plus its shape.
#[derive(Serialize)]
struct RecordRef<'a, K, V> {
    key: &'a K,
    value: &'a V,
    size: usize,
    has_left: bool,
    has_right: bool,
}

/// One node as read back.
#[derive(Deserialize)]
struct Record<K, V> {
    key: K,
    value: V,
    size: usize,
    has_left: bool,
    has_right: bool,
}

/// Serializes a subtree as its pre-order record sequence.
struct PreOrder<'a, K, V>(Option<&'a Node<K, V>>);

impl<K: Serialize, V: Serialize> Serialize for PreOrder<'_, K, V> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut records = serializer.serialize_seq(Some(self.0.map_or(0, |root| root.size)))?;
        let mut pending: Vec<&Node<K, V>> = self.0.into_iter().collect();
        while let Some(node) = pending.pop() {
            records.serialize_element(&RecordRef {
                key: &node.key,
                value: &node.value,
                size: node.size,
                has_left: node.left.is_some(),
                has_right: node.right.is_some(),
            })?;
            pending.extend(node.right.as_deref());
            pending.extend(node.left.as_deref());
        }
        records.end()
    }
}

/// A node still waiting for at least one of its children.
struct Open<K, V> {
    node: Box<Node<K, V>>,
    left: bool,
    right: bool,
}

/// Links pre-order records back into a node graph.
///
/// Only the shape is checked here; sizes and ordering are left to
/// [`RandomBst::verify`].
fn rebuild<K, V>(records: Vec<Record<K, V>>) -> Result<Link<K, V>, ShapeError> {
    let mut open: Vec<Open<K, V>> = Vec::new();
    let mut root: Link<K, V> = None;

    for (index, record) in records.into_iter().enumerate() {
        if root.is_some() {
            dismantle(root);
            return Err(ShapeError::TrailingRecord { index });
        }

        let mut node = Node::leaf(record.key, record.value);
        node.size = record.size;
        let mut complete = if record.has_left || record.has_right {
            open.push(Open {
                node,
                left: record.has_left,
                right: record.has_right,
            });
            None
        } else {
            Some(node)
        };

        // Hand each finished subtree to the nearest open parent, which may
        // in turn be finished by it.
        while let Some(child) = complete.take() {
            let Some(parent) = open.last_mut() else {
                root = Some(child);
                break;
            };
            if parent.left {
                parent.node.left = Some(child);
                parent.left = false;
            } else {
                parent.node.right = Some(child);
                parent.right = false;
            }
            if !parent.left && !parent.right {
                complete = open.pop().map(|finished| finished.node);
            }
        }
    }

    if open.is_empty() {
        Ok(root)
    } else {
        let missing = open.len();
        for unfinished in open {
            dismantle(Some(unfinished.node));
        }
        Err(ShapeError::MissingChildren { open: missing })
    }
}

// =============================================================================
// Snapshot Functions
// =============================================================================

/// Encodes the whole node graph of `tree`.
///
/// # Errors
///
/// Returns [`SnapshotError::Codec`] if a key or value fails to serialize.
pub fn snapshot<K, V, R>(tree: &RandomBst<K, V, R>) -> Result<Vec<u8>, SnapshotError<K>>
where
    K: Serialize,
    V: Serialize,
{
    let bytes = bincode::serialize(&PreOrder(tree.root()))?;
    tracing::debug!(bytes = bytes.len(), size = tree.len(), "encoded snapshot");
    Ok(bytes)
}

/// Rebuilds a tree from [`snapshot`] output, with a freshly seeded random source.
///
/// # Errors
///
/// - [`SnapshotError::Codec`] if the bytes do not decode
/// - [`SnapshotError::Shape`] if the records do not form a single tree
/// - [`SnapshotError::Invalid`] if the rebuilt graph breaks a tree invariant
pub fn restore<K, V>(bytes: &[u8]) -> Result<RandomBst<K, V>, SnapshotError<K>>
where
    K: DeserializeOwned + Ord + Clone,
    V: DeserializeOwned,
{
    restore_with_rng(bytes, StdRng::from_entropy())
}

/// Rebuilds a tree from [`snapshot`] output, drawing future balancing
/// decisions from `rng`.
///
/// # Errors
///
/// Same as [`restore`].
pub fn restore_with_rng<K, V, R>(
    bytes: &[u8],
    rng: R,
) -> Result<RandomBst<K, V, R>, SnapshotError<K>>
where
    K: DeserializeOwned + Ord + Clone,
    V: DeserializeOwned,
{
    let records: Vec<Record<K, V>> = bincode::deserialize(bytes)?;
    accept(rebuild(records)?, rng)
}

/// Writes a snapshot of `tree` to the file at `path`, replacing its contents.
///
/// # Errors
///
/// [`SnapshotError::Io`] if the file cannot be written, or
/// [`SnapshotError::Codec`] if encoding fails.
pub fn write_snapshot<K, V, R>(
    tree: &RandomBst<K, V, R>,
    path: impl AsRef<Path>,
) -> Result<(), SnapshotError<K>>
where
    K: Serialize,
    V: Serialize,
{
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    bincode::serialize_into(&mut writer, &PreOrder(tree.root()))?;
    writer.flush()?;
    tracing::debug!(path = %path.display(), size = tree.len(), "wrote snapshot");
    Ok(())
}

/// Reads a tree previously written with [`write_snapshot`].
///
/// # Errors
///
/// [`SnapshotError::Io`] if the file cannot be opened, otherwise as [`restore`].
pub fn read_snapshot<K, V>(path: impl AsRef<Path>) -> Result<RandomBst<K, V>, SnapshotError<K>>
where
    K: DeserializeOwned + Ord + Clone,
    V: DeserializeOwned,
{
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let records: Vec<Record<K, V>> = bincode::deserialize_from(reader)?;
    let tree = accept(rebuild(records)?, StdRng::from_entropy())?;
    tracing::debug!(path = %path.display(), size = tree.len(), "read snapshot");
    Ok(tree)
}

fn accept<K: Ord + Clone, V, R>(
    root: Link<K, V>,
    rng: R,
) -> Result<RandomBst<K, V, R>, SnapshotError<K>> {
    let tree = RandomBst::from_parts(root, rng);
    tree.verify().map_err(SnapshotError::Invalid)?;
    tracing::debug!(size = tree.len(), "restored snapshot");
    Ok(tree)
}

// =============================================================================
// Serde Implementations
// =============================================================================

impl<K, V, R> Serialize for RandomBst<K, V, R>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        PreOrder(self.root()).serialize(serializer)
    }
}

impl<'de, K, V> Deserialize<'de> for RandomBst<K, V, StdRng>
where
    K: Deserialize<'de> + Ord + Clone + fmt::Debug,
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let records: Vec<Record<K, V>> = Deserialize::deserialize(deserializer)?;
        let root = rebuild(records).map_err(<D::Error as serde::de::Error>::custom)?;
        let tree = Self::from_parts(root, StdRng::from_entropy());
        tree.verify().map_err(<D::Error as serde::de::Error>::custom)?;
        Ok(tree)
    }
}

// =============================================================================
// Tests
// =============================================================================
