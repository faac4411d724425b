//! Merkle tree construction over an ordered chunk sequence
//!
//! Nodes live in a single arena owned by [`MerkleTree`]; child and parent
//! links are [`NodeId`] indices into that arena. A layer is an ordered list of
//! node ids. When a layer has an odd number of nodes the last one is carried
//! into the next layer as-is: the same id appears in both layers and no new
//! node is hashed.

use crate::core::{combine, Digest, HashFunction, MerkleError, NodeId, Result, Sha256Hasher};
use crate::proofs::proof::{Proof, ProofGenerator};
use rayon::prelude::*;
use serde_json::{json, Value};
use tracing::{debug, info};

/// Leaf count at which leaf hashing switches to rayon
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1024;

/// One position in one layer of the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub digest: Digest,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
    /// Set once, when this node is combined into a parent
    pub parent: Option<NodeId>,
}

impl Node {
    fn leaf(digest: Digest) -> Self {
        Self {
            digest,
            left: None,
            right: None,
            parent: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Ordered node ids at one height (height 0 holds the leaves)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    pub height: usize,
    pub nodes: Vec<NodeId>,
}

impl Layer {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }
}

/// Maps chunks to leaf digests, preserving chunk order
pub struct LeafLayer;

impl LeafLayer {
    /// Hash every chunk. With `parallel` set the work is spread over the rayon
    /// pool; `collect` keeps the output in chunk order either way.
    pub fn digest_chunks<H, C>(hasher: &H, chunks: &[C], parallel: bool) -> Vec<Digest>
    where
        H: HashFunction + ?Sized,
        C: AsRef<[u8]> + Sync,
    {
        if parallel {
            chunks
                .par_iter()
                .map(|chunk| hasher.hash(chunk.as_ref()))
                .collect()
        } else {
            chunks
                .iter()
                .map(|chunk| hasher.hash(chunk.as_ref()))
                .collect()
        }
    }
}

/// Builds [`MerkleTree`]s with a given hash function
pub struct TreeBuilder<H = Sha256Hasher> {
    hasher: H,
    parallel_threshold: usize,
}

impl Default for TreeBuilder<Sha256Hasher> {
    fn default() -> Self {
        Self::new(Sha256Hasher)
    }
}

impl<H: HashFunction> TreeBuilder<H> {
    pub fn new(hasher: H) -> Self {
        Self {
            hasher,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    /// Set the chunk count at which leaf hashing goes parallel
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Build a tree over the chunks in order
    pub fn build<C: AsRef<[u8]> + Sync>(&self, chunks: &[C]) -> Result<MerkleTree> {
        if chunks.is_empty() {
            return Err(MerkleError::EmptyInput);
        }

        let parallel = chunks.len() >= self.parallel_threshold;
        debug!(chunks = chunks.len(), parallel, "Hashing leaf layer");
        let leaves = LeafLayer::digest_chunks(&self.hasher, chunks, parallel);
        self.build_from_digests(leaves)
    }

    /// Build a tree from precomputed leaf digests
    pub fn build_from_digests(&self, leaves: Vec<Digest>) -> Result<MerkleTree> {
        if leaves.is_empty() {
            return Err(MerkleError::EmptyInput);
        }

        let leaf_count = leaves.len();
        // A full binary tree over n leaves has at most 2n - 1 nodes
        let mut nodes: Vec<Node> = Vec::with_capacity(leaf_count * 2 - 1);
        nodes.extend(leaves.into_iter().map(Node::leaf));

        let mut layers = vec![Layer {
            height: 0,
            nodes: (0..leaf_count).map(NodeId).collect(),
        }];

        while layers[layers.len() - 1].len() > 1 {
            let current = &layers[layers.len() - 1];
            let height = current.height + 1;
            let mut next = Vec::with_capacity(current.len() / 2 + 1);

            for pair in current.nodes.chunks(2) {
                match *pair {
                    [left, right] => {
                        let id = NodeId(nodes.len());
                        let digest =
                            combine(&self.hasher, &nodes[left.0].digest, &nodes[right.0].digest);
                        nodes[left.0].parent = Some(id);
                        nodes[right.0].parent = Some(id);
                        nodes.push(Node {
                            digest,
                            left: Some(left),
                            right: Some(right),
                            parent: None,
                        });
                        next.push(id);
                    },
                    [carried] => next.push(carried),
                    _ => unreachable!("chunks(2) yields one or two ids"),
                }
            }

            debug!(height, nodes = next.len(), "Built layer");
            layers.push(Layer {
                height,
                nodes: next,
            });
        }

        let root = layers[layers.len() - 1].nodes[0];
        let tree = MerkleTree {
            nodes,
            layers,
            root,
        };
        info!(
            leaves = leaf_count,
            height = tree.height(),
            root = %tree.root_digest(),
            "Built merkle tree"
        );
        Ok(tree)
    }
}

/// A read-only merkle tree. Cheap to share across threads for concurrent
/// proof generation.
#[derive(Debug, Clone)]
pub struct MerkleTree {
    nodes: Vec<Node>,
    layers: Vec<Layer>,
    root: NodeId,
}

impl MerkleTree {
    /// Build with SHA-256
    pub fn from_chunks<C: AsRef<[u8]> + Sync>(chunks: &[C]) -> Result<Self> {
        TreeBuilder::new(Sha256Hasher).build(chunks)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn root_digest(&self) -> &Digest {
        &self.nodes[self.root.0].digest
    }

    pub fn leaf_count(&self) -> usize {
        self.layers[0].len()
    }

    /// Number of combination rounds; 0 for a single-leaf tree
    pub fn height(&self) -> usize {
        self.layers.len() - 1
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, height: usize) -> Option<&Layer> {
        self.layers.get(height)
    }

    /// Number of distinct nodes in the arena
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn leaf_id(&self, index: usize) -> Result<NodeId> {
        self.layers[0]
            .nodes
            .get(index)
            .copied()
            .ok_or_else(|| MerkleError::index_out_of_range(index, self.leaf_count()))
    }

    pub fn leaf(&self, index: usize) -> Result<&Node> {
        let id = self.leaf_id(index)?;
        Ok(&self.nodes[id.0])
    }

    pub fn leaf_digests(&self) -> Vec<Digest> {
        self.layers[0]
            .iter()
            .map(|id| self.nodes[id.0].digest.clone())
            .collect()
    }

    /// Digests of one layer, in order
    pub fn layer_digests(&self, height: usize) -> Option<Vec<Digest>> {
        self.layer(height).map(|layer| {
            layer
                .iter()
                .map(|id| self.nodes[id.0].digest.clone())
                .collect()
        })
    }

    /// Generate an inclusion proof for the leaf at `index`
    pub fn prove(&self, index: usize) -> Result<Proof> {
        ProofGenerator::prove(self, index)
    }

    /// Nested `{hash, left, right}` document rooted at the tree's root
    pub fn to_json(&self) -> Value {
        self.node_json(self.root)
    }

    fn node_json(&self, id: NodeId) -> Value {
        let node = &self.nodes[id.0];
        json!({
            "hash": node.digest,
            "left": node.left.map(|child| self.node_json(child)),
            "right": node.right.map(|child| self.node_json(child)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sha256;

    fn tree_of(items: &[&str]) -> MerkleTree {
        let chunks: Vec<&[u8]> = items.iter().map(|s| s.as_bytes()).collect();
        MerkleTree::from_chunks(&chunks).unwrap()
    }

    #[test]
    fn test_empty_input_rejected() {
        let chunks: Vec<Vec<u8>> = Vec::new();
        let err = MerkleTree::from_chunks(&chunks).unwrap_err();
        assert!(matches!(err, MerkleError::EmptyInput));
    }

    #[test]
    fn test_single_leaf_is_root() {
        let tree = tree_of(&["only"]);
        assert_eq!(tree.root_digest(), &sha256(b"only"));
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.layers().len(), 1);
        assert!(tree.node(tree.root()).unwrap().parent.is_none());
    }

    #[test]
    fn test_two_leaves_known_root() {
        let tree = tree_of(&["a", "b"]);
        assert_eq!(
            tree.root_digest().as_str(),
            "62af5c3cb8da3e4f25061e829ebeea5c7513c54949115b1acc225930a90154da"
        );
    }

    #[test]
    fn test_odd_layer_carries_last_node() {
        let tree = tree_of(&["a", "b", "c"]);
        let leaves = tree.layer(0).unwrap();
        let layer1 = tree.layer(1).unwrap();

        assert_eq!(layer1.len(), 2);
        // Carried node keeps its identity
        assert_eq!(layer1.nodes[1], leaves.nodes[2]);
        assert_eq!(tree.node_count(), 5);
        assert_eq!(
            tree.root_digest().as_str(),
            "d71dc32fa2cd95be60b32dbb3e63009fa8064407ee19f457c92a09a5ff841a8a"
        );
    }

    #[test]
    fn test_parent_links() {
        let tree = tree_of(&["a", "b", "c", "d", "e"]);
        for id in tree.layer(0).unwrap().iter() {
            let mut current = id;
            let mut steps = 0;
            while let Some(parent) = tree.node(current).unwrap().parent {
                let parent_node = tree.node(parent).unwrap();
                assert!(parent_node.left == Some(current) || parent_node.right == Some(current));
                current = parent;
                steps += 1;
            }
            assert_eq!(current, tree.root());
            assert!(steps <= tree.height());
        }
    }

    #[test]
    fn test_layer_sizes() {
        let tree = tree_of(&["1", "2", "3", "4", "5", "6", "7"]);
        let sizes: Vec<usize> = tree.layers().iter().map(Layer::len).collect();
        assert_eq!(sizes, vec![7, 4, 2, 1]);
        // 7 leaves, 3 + 2 + 1 combined nodes
        assert_eq!(tree.node_count(), 13);
    }

    #[test]
    fn test_leaf_lookup_out_of_range() {
        let tree = tree_of(&["a", "b"]);
        assert!(tree.leaf(1).is_ok());
        assert!(matches!(
            tree.leaf(2),
            Err(MerkleError::IndexOutOfRange {
                index: 2,
                leaf_count: 2
            })
        ));
    }

    #[test]
    fn test_parallel_leaf_hashing_matches_sequential() {
        let chunks: Vec<Vec<u8>> = (0..50u32).map(|i| i.to_le_bytes().to_vec()).collect();
        let sequential = TreeBuilder::new(Sha256Hasher)
            .with_parallel_threshold(usize::MAX)
            .build(&chunks)
            .unwrap();
        let parallel = TreeBuilder::new(Sha256Hasher)
            .with_parallel_threshold(1)
            .build(&chunks)
            .unwrap();
        assert_eq!(sequential.root_digest(), parallel.root_digest());
        assert_eq!(sequential.leaf_digests(), parallel.leaf_digests());
    }

    #[test]
    fn test_json_dump_shape() {
        let tree = tree_of(&["a", "b", "c"]);
        let doc = tree.to_json();
        assert_eq!(doc["hash"], tree.root_digest().as_str());
        assert_eq!(doc["right"]["hash"], sha256(b"c").as_str());
        assert!(doc["right"]["left"].is_null());
        assert_eq!(doc["left"]["left"]["hash"], sha256(b"a").as_str());
    }
}
