//! Offline search for magic multipliers.
//!
//! Finds, for every square and slider kind, a 64-bit multiplier that
//! perfect-hashes the square's relevant occupancies into a table of
//! 2^index_bits entries, then prints the results as Rust arrays ready to be
//! pasted into the engine.
//!
//! The search is randomized: candidates are the AND of a few random words
//! (sparse numbers work markedly better), filtered by a quick density check
//! on the hash's top byte before the full collision test.

use rand::rngs::ThreadRng;
use rand::Rng;

use chess_rules::movegen::magics::{
    bishop_rays, bishop_relevance_mask, occupancy_subset, rook_rays, rook_relevance_mask,
    BISHOP_INDEX_BITS, ROOK_INDEX_BITS,
};
use chess_rules::Bitboard;
use chess_types::Square;

const MAX_ATTEMPTS: u32 = 10_000_000;

fn sparse_candidate(rng: &mut ThreadRng) -> u64 {
    rng.gen::<u64>() & rng.gen::<u64>() & rng.gen::<u64>()
}

/// Searches for a collision-free multiplier for one square.
fn find_magic(
    sq: Square,
    mask: Bitboard,
    index_bits: u8,
    rays: impl Fn(Square, Bitboard) -> Bitboard,
    rng: &mut ThreadRng,
) -> Option<u64> {
    let subsets = 1usize << mask.count();
    let occupancies: Vec<Bitboard> = (0..subsets).map(|i| occupancy_subset(i, mask)).collect();
    let attacks: Vec<Bitboard> = occupancies.iter().map(|&occ| rays(sq, occ)).collect();
    let shift = 64 - index_bits;

    let mut table: Vec<Bitboard> = vec![Bitboard::EMPTY; 1 << index_bits];
    for _ in 0..MAX_ATTEMPTS {
        let magic = sparse_candidate(rng);
        // A usable magic spreads the mask's bits into the index; candidates
        // whose top byte comes out nearly empty never survive the full test.
        if (mask.0.wrapping_mul(magic) & 0xff00_0000_0000_0000).count_ones() < 6 {
            continue;
        }

        table.fill(Bitboard::EMPTY);
        let mut collided = false;
        for (occ, attack) in occupancies.iter().zip(&attacks) {
            let index = (occ.0.wrapping_mul(magic) >> shift) as usize;
            if table[index].is_empty() {
                table[index] = *attack;
            } else if table[index] != *attack {
                collided = true;
                break;
            }
        }
        if !collided {
            return Some(magic);
        }
    }
    None
}

fn find_all(
    name: &str,
    index_bits: &[u8; 64],
    mask_of: impl Fn(Square) -> Bitboard,
    rays: impl Fn(Square, Bitboard) -> Bitboard + Copy,
    rng: &mut ThreadRng,
) {
    println!("const {name}: [u64; 64] = [");
    for i in 0..64u8 {
        let sq = match Square::from_index(i) {
            Some(sq) => sq,
            None => unreachable!(),
        };
        let bits = index_bits[i as usize];
        match find_magic(sq, mask_of(sq), bits, rays, rng) {
            Some(magic) => println!("    {magic:#018x},"),
            None => {
                eprintln!("no magic found for {sq} within {MAX_ATTEMPTS} attempts");
                std::process::exit(1);
            }
        }
    }
    println!("];");
}

fn main() {
    let mut rng = rand::thread_rng();
    find_all(
        "BISHOP_MAGICS",
        &BISHOP_INDEX_BITS,
        bishop_relevance_mask,
        bishop_rays,
        &mut rng,
    );
    println!();
    find_all(
        "ROOK_MAGICS",
        &ROOK_INDEX_BITS,
        rook_relevance_mask,
        rook_rays,
        &mut rng,
    );
}
