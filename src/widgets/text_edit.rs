pub fn char_count(value: &str) -> usize {
    value.chars().count()
}

pub fn clamp_cursor(cursor: usize, value: &str) -> usize {
    cursor.min(char_count(value))
}

pub fn insert_char(value: &mut String, cursor: &mut usize, ch: char) {
    let pos = clamp_cursor(*cursor, value);
    let byte_pos = byte_index_at_char(value, pos);
    value.insert(byte_pos, ch);
    *cursor = pos + 1;
}

pub fn backspace_char(value: &mut String, cursor: &mut usize) -> bool {
    let pos = clamp_cursor(*cursor, value);
    if pos == 0 {
        return false;
    }
    let byte_pos = byte_index_at_char(value, pos - 1);
    value.remove(byte_pos);
    *cursor = pos - 1;
    true
}

pub fn delete_char(value: &mut String, cursor: &mut usize) -> bool {
    let pos = clamp_cursor(*cursor, value);
    if pos >= char_count(value) {
        return false;
    }
    let byte_pos = byte_index_at_char(value, pos);
    value.remove(byte_pos);
    *cursor = pos;
    true
}

fn byte_index_at_char(value: &str, char_idx: usize) -> usize {
    if char_idx == 0 {
        return 0;
    }
    value
        .char_indices()
        .nth(char_idx)
        .map(|(idx, _)| idx)
        .unwrap_or(value.len())
}

#[cfg(test)]
mod tests {
    use super::{backspace_char, delete_char, insert_char};

    #[test]
    fn insert_and_remove_track_cursor() {
        let mut value = "23".to_string();
        let mut cursor = 1;
        insert_char(&mut value, &mut cursor, '0');
        assert_eq!((value.as_str(), cursor), ("203", 2));

        assert!(backspace_char(&mut value, &mut cursor));
        assert_eq!((value.as_str(), cursor), ("23", 1));

        assert!(delete_char(&mut value, &mut cursor));
        assert_eq!((value.as_str(), cursor), ("2", 1));
        assert!(!delete_char(&mut value, &mut cursor));
    }
}
