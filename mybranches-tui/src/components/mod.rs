pub mod branch_list;
pub mod cleanup_progress;
pub mod confirm_delete;
pub mod help;

#[cfg(test)]
pub(crate) fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let mut output = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            output.push(buffer[(x, y)].symbol().chars().next().unwrap_or(' '));
        }
        output.push('\n');
    }
    output
}
