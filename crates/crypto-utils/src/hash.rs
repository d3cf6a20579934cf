/// BLAKE2b with a 224-bit digest, the hash Cardano uses for key hashes.
pub fn blake2b_224(data: &[u8]) -> [u8; 28] {
    let hash = blake2b_simd::Params::new().hash_length(28).hash(data);

    let mut result = [0u8; 28];
    result.copy_from_slice(hash.as_bytes());
    result
}
