const KB: u64 = 1024;
const MB: u64 = 1024 * 1024;

/// Human-readable size: `"X.XX MB"` from 1 MiB upwards, `"X.XX KB"` below.
///
/// The two decimals are truncated, not rounded, so values just under 1 MiB
/// never print as `"1024.00 KB"`.
pub fn format_file_size(bytes: u64) -> String {
    let (unit, label) = if bytes >= MB { (MB, "MB") } else { (KB, "KB") };
    let hundredths = (bytes as u128 * 100) / unit as u128;
    format!("{}.{:02} {}", hundredths / 100, hundredths % 100, label)
}
