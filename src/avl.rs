//! AVL rebalancing strategy for [`OrderedMap`](crate::tree::OrderedMap)
//!
//! After each insert or delete the nodes on the path back to the root are
//! rebalanced bottom-up. A node whose balance factor (left height minus right
//! height) leaves `[-1, 1]` is fixed with one or two rotations:
//!
//! | Case | Balance factor | Child factor | Fix                         |
//! |------|----------------|--------------|-----------------------------|
//! | LL   | `> 1`          | left `>= 0`  | rotate right                |
//! | LR   | `> 1`          | left `< 0`   | rotate left child, then right |
//! | RR   | `< -1`         | right `<= 0` | rotate left                 |
//! | RL   | `< -1`         | right `> 0`  | rotate right child, then left |

use crate::tree::{Balance, Node};

/// Height-balancing strategy; see [`AvlTree`](crate::tree::AvlTree)
#[derive(Clone, Copy, Debug, Default)]
pub struct Avl;

impl Balance for Avl {
    const BALANCED: bool = true;

    fn rebalance<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
        let factor = node.balance_factor();
        if factor > 1 {
            if node.left().map_or(0, Node::balance_factor) < 0 {
                node.left = node.left.take().map(rotate_left);
            }
            return rotate_right(node);
        }
        if factor < -1 {
            if node.right().map_or(0, Node::balance_factor) > 0 {
                node.right = node.right.take().map(rotate_right);
            }
            return rotate_left(node);
        }
        node
    }
}

/// Lifts the left child above `root`
fn rotate_right<K, V>(mut root: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let Some(mut pivot) = root.left.take() else {
        return root;
    };
    root.left = pivot.right.take();
    root.update_height();
    pivot.right = Some(root);
    pivot.update_height();
    pivot
}

/// Lifts the right child above `root`
fn rotate_left<K, V>(mut root: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let Some(mut pivot) = root.right.take() else {
        return root;
    };
    root.right = pivot.left.take();
    root.update_height();
    pivot.left = Some(root);
    pivot.update_height();
    pivot
}
