pub(crate) enum DBStatus {
    Exist(u32),
    NotExist,
}
