//! Property-based tests for `OpenHashMap` and `RobinHoodHashMap`.
//!
//! Both maps are driven by the same random operation sequence as a
//! `std::collections::HashMap` model and must agree after every step.

#![expect(clippy::unwrap_used)]

use std::collections::HashMap;
use std::hash::BuildHasher;

use algolab::hash::{FnvBuildHasher, OpenHashMap, RobinHoodHashMap};
use proptest::prelude::*;

// ============================================================================
//  Strategies
// ============================================================================

#[derive(Debug, Clone)]
enum MapOp {
    Insert(u16, u32),
    Remove(u16),
    Get(u16),
}

/// Keys come from a small range so inserts, hits and removals collide often.
fn map_op() -> impl Strategy<Value = MapOp> {
    prop_oneof![
        4 => (0u16..256, any::<u32>()).prop_map(|(k, v)| MapOp::Insert(k, v)),
        2 => (0u16..256).prop_map(MapOp::Remove),
        2 => (0u16..256).prop_map(MapOp::Get),
    ]
}

fn load_factor() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.25), Just(0.5), Just(0.75), Just(0.9), Just(0.95)]
}

/// The operations both maps share.
trait ModelMap {
    fn insert(&mut self, k: u16, v: u32) -> Option<u32>;
    fn remove(&mut self, k: &u16) -> Option<u32>;
    fn get(&self, k: &u16) -> Option<&u32>;
    fn len(&self) -> usize;
    fn pairs(&self) -> Vec<(u16, u32)>;
}

impl<S: BuildHasher> ModelMap for OpenHashMap<u16, u32, S> {
    fn insert(&mut self, k: u16, v: u32) -> Option<u32> {
        Self::insert(self, k, v)
    }
    fn remove(&mut self, k: &u16) -> Option<u32> {
        Self::remove(self, k)
    }
    fn get(&self, k: &u16) -> Option<&u32> {
        Self::get(self, k)
    }
    fn len(&self) -> usize {
        Self::len(self)
    }
    fn pairs(&self) -> Vec<(u16, u32)> {
        let mut out: Vec<_> = self.iter().map(|(&k, &v)| (k, v)).collect();
        out.sort_unstable();
        out
    }
}

impl<S: BuildHasher> ModelMap for RobinHoodHashMap<u16, u32, S> {
    fn insert(&mut self, k: u16, v: u32) -> Option<u32> {
        Self::insert(self, k, v)
    }
    fn remove(&mut self, k: &u16) -> Option<u32> {
        Self::remove(self, k)
    }
    fn get(&self, k: &u16) -> Option<&u32> {
        Self::get(self, k)
    }
    fn len(&self) -> usize {
        Self::len(self)
    }
    fn pairs(&self) -> Vec<(u16, u32)> {
        let mut out: Vec<_> = self.iter().map(|(&k, &v)| (k, v)).collect();
        out.sort_unstable();
        out
    }
}

fn check_against_model<M: ModelMap>(map: &mut M, ops: &[MapOp]) -> Result<(), TestCaseError> {
    let mut model: HashMap<u16, u32> = HashMap::new();

    for op in ops {
        match *op {
            MapOp::Insert(k, v) => {
                prop_assert_eq!(map.insert(k, v), model.insert(k, v), "insert {}", k);
            }
            MapOp::Remove(k) => {
                prop_assert_eq!(map.remove(&k), model.remove(&k), "remove {}", k);
            }
            MapOp::Get(k) => {
                prop_assert_eq!(map.get(&k), model.get(&k), "get {}", k);
            }
        }
        prop_assert_eq!(map.len(), model.len());
    }

    let mut expected: Vec<_> = model.into_iter().collect();
    expected.sort_unstable();
    prop_assert_eq!(map.pairs(), expected);
    Ok(())
}

proptest! {
    #[test]
    fn open_matches_std(lf in load_factor(), ops in prop::collection::vec(map_op(), 0..600)) {
        let mut map: OpenHashMap<u16, u32> = OpenHashMap::with_load_factor(lf).unwrap();
        check_against_model(&mut map, &ops)?;
    }

    #[test]
    fn robin_hood_matches_std(lf in load_factor(), ops in prop::collection::vec(map_op(), 0..600)) {
        let mut map: RobinHoodHashMap<u16, u32> = RobinHoodHashMap::with_load_factor(lf).unwrap();
        check_against_model(&mut map, &ops)?;
    }

    /// Same checks with the deterministic FNV hasher.
    #[test]
    fn fnv_backed_maps_match_std(lf in load_factor(), ops in prop::collection::vec(map_op(), 0..600)) {
        let mut open: OpenHashMap<u16, u32, FnvBuildHasher> =
            OpenHashMap::with_hasher(lf, FnvBuildHasher::default()).unwrap();
        check_against_model(&mut open, &ops)?;

        let mut robin: RobinHoodHashMap<u16, u32, FnvBuildHasher> =
            RobinHoodHashMap::with_hasher(lf, FnvBuildHasher::default()).unwrap();
        check_against_model(&mut robin, &ops)?;
    }

    /// The table never fills past its load factor.
    #[test]
    fn load_factor_respected(lf in load_factor(), keys in prop::collection::hash_set(any::<u16>(), 0..500)) {
        let mut open = OpenHashMap::with_load_factor(lf).unwrap();
        let mut robin = RobinHoodHashMap::with_load_factor(lf).unwrap();
        for &k in &keys {
            open.insert(k, u32::from(k));
            robin.insert(k, u32::from(k));

            let (open_ratio, robin_ratio) = (
                open.len() as f64 / open.capacity() as f64,
                robin.len() as f64 / robin.capacity() as f64,
            );
            prop_assert!(open_ratio <= lf, "open ratio {} > {}", open_ratio, lf);
            prop_assert!(robin_ratio <= lf, "robin ratio {} > {}", robin_ratio, lf);
        }
    }
}
