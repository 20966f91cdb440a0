use soroban_sdk::{Env, IntoVal, Symbol, TryFromVal, Val, Vec};

// ── TTL ───────────────────────────────────────────────────────
pub const TTL_THRESHOLD: u32 = 5184000;
pub const TTL_EXTEND_TO: u32 = 10368000;

/// Extends the time-to-live (TTL) for a persistent collection key.
fn extend_ttl(env: &Env, key: &Symbol) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Returns true when something is stored under `key`, decodable or not.
pub fn has_key(env: &Env, key: &Symbol) -> bool {
    env.storage().persistent().has(key)
}

/// Reads a whole collection stored under `key`.
///
/// An absent key and a payload that does not decode as `Vec<T>` both read as
/// an empty collection. A single undecodable element discards the whole
/// collection rather than returning a partial one.
pub fn load_collection<T>(env: &Env, key: &Symbol) -> Vec<T>
where
    T: IntoVal<Env, Val> + TryFromVal<Env, Val>,
{
    let raw = match env.storage().persistent().get::<_, Val>(key) {
        Some(raw) => raw,
        None => return Vec::new(env),
    };

    let entries = match <Vec<Val> as TryFromVal<Env, Val>>::try_from_val(env, &raw) {
        Ok(entries) => entries,
        Err(_) => return Vec::new(env),
    };

    let mut items = Vec::new(env);
    for entry in entries.iter() {
        match <T as TryFromVal<Env, Val>>::try_from_val(env, &entry) {
            Ok(item) => items.push_back(item),
            Err(_) => return Vec::new(env),
        }
    }
    items
}

/// Writes a whole collection under `key` in one `set`.
pub fn save_collection<T>(env: &Env, key: &Symbol, items: &Vec<T>)
where
    T: IntoVal<Env, Val> + TryFromVal<Env, Val>,
{
    env.storage().persistent().set(key, items);
    extend_ttl(env, key);
}

/// Reads a single record, treating an undecodable payload as absent.
pub fn load_record<T>(env: &Env, key: &Symbol) -> Option<T>
where
    T: TryFromVal<Env, Val>,
{
    let raw = env.storage().persistent().get::<_, Val>(key)?;
    <T as TryFromVal<Env, Val>>::try_from_val(env, &raw).ok()
}

pub fn save_record<T>(env: &Env, key: &Symbol, record: &T)
where
    T: IntoVal<Env, Val>,
{
    env.storage().persistent().set(key, record);
    extend_ttl(env, key);
}

pub fn remove_key(env: &Env, key: &Symbol) {
    env.storage().persistent().remove(key);
}
