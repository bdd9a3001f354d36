use std::collections::{HashMap, HashSet};
use std::ops::BitAnd;

use bytes::{BufMut, BytesMut};
use roaring::RoaringBitmap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::tokeniser::tokenise;

/// Inverted index for keyword search on transaction titles. Tokens are
/// interned to u32 ids; each posting list is a roaring bitmap of
/// transaction ids. Titles go through the same tokeniser as pattern
/// learning, so searches see the same tokens the learner does.
pub(crate) struct SearchIndex {
    token_ids: HashMap<String, u32>,
    token_id_seed: u32,
    /// token id -> transactions whose title contains that token
    posting_list: HashMap<u32, RoaringBitmap>,
}

/// Bincode friendly shape: roaring bitmaps travel in their native byte
/// encoding rather than as serde structures.
#[derive(Serialize, Deserialize)]
struct EncodedIndex {
    token_ids: HashMap<String, u32>,
    token_id_seed: u32,
    postings: Vec<(u32, Vec<u8>)>,
}

impl Serialize for SearchIndex {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
    {
        let mut postings = Vec::with_capacity(self.posting_list.len());
        for (token_id, bitmap) in &self.posting_list {
            let mut writer = BytesMut::with_capacity(bitmap.serialized_size()).writer();
            bitmap.serialize_into(&mut writer).map_err(serde::ser::Error::custom)?;
            postings.push((*token_id, writer.into_inner().to_vec()));
        }

        let encoded = EncodedIndex {
            token_ids: self.token_ids.clone(),
            token_id_seed: self.token_id_seed,
            postings,
        };
        encoded.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SearchIndex {
    fn deserialize<D>(deserializer: D) -> Result<SearchIndex, D::Error>
        where
            D: Deserializer<'de>,
    {
        let encoded = EncodedIndex::deserialize(deserializer)?;

        let mut posting_list = HashMap::with_capacity(encoded.postings.len());
        for (token_id, bytes) in encoded.postings {
            let bitmap = RoaringBitmap::deserialize_from(&bytes[..]).map_err(serde::de::Error::custom)?;
            posting_list.insert(token_id, bitmap);
        }

        Ok(SearchIndex {
            token_ids: encoded.token_ids,
            token_id_seed: encoded.token_id_seed,
            posting_list,
        })
    }
}

impl SearchIndex {
    pub(crate) fn new() -> SearchIndex {
        SearchIndex {
            token_ids: HashMap::new(),
            token_id_seed: 0,
            posting_list: HashMap::new(),
        }
    }

    pub(crate) fn index(&mut self, transaction_id: u32, title: &str) {
        for token in tokenise(title) {
            let token_id = match self.token_ids.get(&token) {
                Some(token_id) => *token_id,
                None => {
                    self.token_id_seed += 1;
                    self.token_ids.insert(token, self.token_id_seed);
                    self.token_id_seed
                }
            };
            let posting: &mut RoaringBitmap = self.posting_list.entry(token_id).or_insert_with(RoaringBitmap::new);
            posting.insert(transaction_id);
        }
    }

    /// Ids of transactions whose title contains every keyword token. A token
    /// no title carries means there is nothing to find.
    pub(crate) fn search(&self, keywords: &str) -> HashSet<u32> {
        let mut maps: Vec<&RoaringBitmap> = vec![];
        for token in tokenise(keywords) {
            match self.token_ids.get(&token).and_then(|token_id| self.posting_list.get(token_id)) {
                Some(bitmap) => maps.push(bitmap),
                None => return HashSet::new(),
            }
        }

        let mut transaction_ids = HashSet::new();
        if !maps.is_empty() {
            let mut intersection = maps[0].clone();
            for map in maps.into_iter().skip(1) {
                intersection = intersection.bitand(map);
            }
            for transaction_id in intersection.iter() {
                transaction_ids.insert(transaction_id);
            }
        }
        transaction_ids
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use super::SearchIndex;

    #[test]
    fn indexes_and_intersects() {
        let mut index = SearchIndex::new();
        index.index(1, "MERCADO EXTRA JARDINS");
        index.index(2, "Mercado Municipal");
        index.index(3, "POSTO SHELL JARDINS");

        assert_eq!(index.search("mercado"), HashSet::from([1, 2]));
        // every token has to match
        assert_eq!(index.search("MERCADO jardins"), HashSet::from([1]));
        assert_eq!(index.search("mercado shell"), HashSet::new());
        assert_eq!(index.search("inexistente"), HashSet::new());
    }

    #[test]
    fn round_trips_through_bincode() {
        let mut index = SearchIndex::new();
        index.index(7, "Cobasi Racao Premium");
        index.index(9, "Cobasi Banho e Tosa");

        let bytes = bincode::serialize(&index).unwrap();
        let reloaded: SearchIndex = bincode::deserialize(&bytes).unwrap();

        assert_eq!(reloaded.search("cobasi"), HashSet::from([7, 9]));
        assert_eq!(reloaded.search("racao"), HashSet::from([7]));
    }
}
