#![no_main]

use std::collections::HashMap;

use directcache::{CacheConfig, DirectCache, RawCodec};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|ops: Vec<(u8, u8, Vec<u8>)>| {
    let cache: DirectCache<u8, Vec<u8>, _> =
        DirectCache::new(&CacheConfig::new(8, 5).unwrap(), RawCodec).unwrap();
    let mut model: HashMap<u8, Vec<u8>> = HashMap::new();

    for (op, key, value) in ops {
        let key = key % 8;
        match op % 5 {
            0 => assert_eq!(cache.put(key, value.clone()).unwrap(), model.insert(key, value)),
            1 => {
                let expected = model.get(&key).cloned();
                if expected.is_none() {
                    model.insert(key, value.clone());
                }
                assert_eq!(cache.put_if_absent(key, value).unwrap(), expected);
            }
            2 => assert_eq!(cache.get(&key).unwrap(), model.get(&key).cloned()),
            3 => assert_eq!(cache.remove(&key).unwrap(), model.remove(&key)),
            _ => {
                cache.clear();
                model.clear();
            }
        }
        assert_eq!(cache.len(), model.len());
        assert!(cache.pool().idle_count() <= 8);
    }
});
