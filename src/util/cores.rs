/// Returns the number of logical CPU cores available on the system.
///
/// Portable stand-in for the platform-specific core-counting dance
/// (`GetSystemInfo` on Windows, `sysctlbyname` on Darwin/BSD, `sysconf` on
/// Linux): `std::thread::available_parallelism` already abstracts over all
/// of them.
///
/// Guaranteed to return a value ≥ 1, falling back to 1 on error.
pub fn count_cores() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
