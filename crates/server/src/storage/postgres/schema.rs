// Tables of schema `v0`, kept in sync with `migrations::MIGRATIONS`.

diesel::table! {
    v0.version (value) {
        value -> Int4,
    }
}

diesel::table! {
    v0.targets (id) {
        id -> Int4,
        name -> Text,
    }
}
