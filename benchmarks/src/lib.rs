//! Shared fixtures for wayfinder benchmark suites.

use wayfinder_harness::worlds::page_collect::{PageCollect, Pos};
use wayfinder_harness::worlds::ridge::Ridge;
use wayfinder_harness::worlds::rubik2d::{Grid, Rubik2D};
use wayfinder_kernel::{Fingerprint, Problem};
use wayfinder_search::{NodeArena, NodeId};

/// A 3x3 puzzle whose goal is the solved grid scrambled by `moves`
/// rotations. Move `i` is action `(7 * i + 3) mod 12`, so consecutive moves
/// rarely cancel.
///
/// # Panics
///
/// Panics if the built-in grid fails to parse. Benchmark setup failures are
/// fatal.
#[must_use]
pub fn scrambled_rubik(moves: usize) -> Rubik2D {
    let solved = Grid::from_rows(&["abc", "def", "ghi"]).expect("solved grid");
    let probe = Rubik2D::new(solved.clone(), solved.clone()).expect("same shape");
    let actions = probe.actions(&solved);
    let mut goal = solved.clone();
    for i in 0..moves {
        goal = probe
            .result(&goal, &actions[(7 * i + 3) % actions.len()])
            .expect("own action");
    }
    Rubik2D::new(solved, goal).expect("same shape")
}

/// Two pages in opposite corners of a walled room.
///
/// # Panics
///
/// Panics if the built-in maze fails to parse.
#[must_use]
pub fn two_page_maze() -> PageCollect {
    PageCollect::from_rows(&[
        "###########",
        "#@   #   p#",
        "# ## # ## #",
        "#    #    #",
        "# ##   ## #",
        "#p   #   X#",
        "###########",
    ])
    .expect("built-in maze")
}

/// A 6x8 height map with several local maxima.
///
/// # Panics
///
/// Panics if the built-in map fails to parse.
#[must_use]
pub fn bumpy_ridge() -> Ridge {
    Ridge::from_rows(
        &[
            "31415926", "53589793", "23846264", "33832795", "02884197", "16939937",
        ],
        Pos::new(0, 0),
    )
    .expect("built-in ridge")
}

/// An arena holding `n` nodes (a chain of `u64` states) and their ids.
#[must_use]
pub fn chain_arena(n: u64) -> (NodeArena<u64, ()>, Vec<NodeId>) {
    let mut arena = NodeArena::new();
    let mut ids = Vec::new();
    let mut parent = arena.insert_root(0, Fingerprint::of(&0u64), 0);
    ids.push(parent);
    for state in 1..n {
        parent = arena.insert_child(parent, state, Fingerprint::of(&state), (), state, 0);
        ids.push(parent);
    }
    (arena, ids)
}
