/// Author shown in page footers when the configuration does not name one.
pub fn default_author() -> String {
    let name = whoami::realname();
    let name = name.trim();
    if name.is_empty() {
        return whoami::username();
    }
    name.to_string()
}
