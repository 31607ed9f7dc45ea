//! Static territory graph.
//!
//! A map never changes during a game; states share it behind an `Arc` and
//! hash only the mutable position on top of it.

use std::sync::Arc;

/// Index into [`Map::territories`].
pub type TerritoryId = u8;

#[derive(Debug)]
pub struct Territory {
    pub name: &'static str,
    pub adjacent: Vec<TerritoryId>,
}

/// A group of territories granting bonus reinforcements when fully held.
#[derive(Debug)]
pub struct Region {
    pub name: &'static str,
    pub territories: Vec<TerritoryId>,
    pub bonus: u8,
}

#[derive(Debug)]
pub struct Map {
    pub territories: Vec<Territory>,
    pub regions: Vec<Region>,
}

impl Map {
    /// The built-in two-region, eight-territory map.
    ///
    /// Two rings of four, joined by two bridges:
    ///
    /// ```text
    ///   0 -- 1        4 -- 5
    ///   |   |        |   |
    ///   3 -- 2        7 -- 6
    ///
    ///   bridges: 0-4 and 2-6
    /// ```
    pub fn frontier() -> Arc<Map> {
        let adjacency: [&[TerritoryId]; 8] = [
            &[1, 3, 4],
            &[0, 2],
            &[1, 3, 6],
            &[0, 2],
            &[5, 7, 0],
            &[4, 6],
            &[5, 7, 2],
            &[4, 6],
        ];
        let names = [
            "Northwood",
            "Eastmarch",
            "Stormwatch",
            "Ironvale",
            "Sunfall",
            "Thornfield",
            "Deepmere",
            "Ashenford",
        ];

        let territories = names
            .iter()
            .zip(adjacency.iter())
            .map(|(name, adjacent)| Territory {
                name,
                adjacent: adjacent.to_vec(),
            })
            .collect();

        Arc::new(Map {
            territories,
            regions: vec![
                Region {
                    name: "North",
                    territories: vec![0, 1, 2, 3],
                    bonus: 2,
                },
                Region {
                    name: "South",
                    territories: vec![4, 5, 6, 7],
                    bonus: 2,
                },
            ],
        })
    }

    pub fn len(&self) -> usize {
        self.territories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.territories.is_empty()
    }

    pub fn adjacent(&self, from: TerritoryId, to: TerritoryId) -> bool {
        self.territories[from as usize].adjacent.contains(&to)
    }
}
