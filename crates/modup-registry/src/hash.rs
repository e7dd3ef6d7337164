//! The canonical 32-bit name hash.

/// Compute the 32-bit FNV hash the game engine uses for names.
///
/// The hash is case-insensitive: the name is folded to lower case before
/// hashing, so `"Creature"` and `"creature"` produce the same value. The
/// result is the engine's signed reinterpretation of the unsigned 32-bit
/// FNV state, which is why this returns `i32` rather than `u32`.
pub fn fnv_hash(name: &str) -> i32 {
    let mut state: u32 = 0x811C_9DC5;
    for c in name.to_lowercase().chars() {
        state = state.wrapping_mul(0x0100_0193);
        state ^= c as u32;
    }
    state as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn hash_is_deterministic() {
        assert_eq!(fnv_hash("creature"), fnv_hash("creature"));
        assert_eq!(fnv_hash(""), fnv_hash(""));
    }

    #[test]
    fn hash_is_case_insensitive() {
        assert_eq!(fnv_hash("Creature"), fnv_hash("creature"));
        assert_eq!(fnv_hash("CREATURE"), fnv_hash("cReAtUrE"));
    }

    #[test]
    fn different_names_usually_differ() {
        assert_ne!(fnv_hash("creature"), fnv_hash("building"));
        assert_ne!(fnv_hash("a"), fnv_hash("b"));
    }

    #[test]
    fn empty_name_is_offset_basis() {
        // No input characters: the state never leaves the FNV offset basis.
        assert_eq!(fnv_hash(""), 0x811C_9DC5_u32 as i32);
    }

    proptest! {
        #[test]
        fn case_fold_invariance(s in "[ -~]{0,64}") {
            prop_assert_eq!(fnv_hash(&s.to_uppercase()), fnv_hash(&s.to_lowercase()));
        }

        #[test]
        fn deterministic(s in ".{0,64}") {
            prop_assert_eq!(fnv_hash(&s), fnv_hash(&s));
        }
    }
}
