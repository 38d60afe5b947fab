// cli/ops.rs: File-level compress / decompress / test operations.
//
// Sources and destinations are resolved here: `-` selects stdin/stdout,
// default output names are derived from the input, existing outputs are
// refused unless forced, and the input's modification time is carried over
// to regular output files.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use filetime::FileTime;

use crate::cli::constants::STDIO_MARK;
use crate::codec::Strategy;
use crate::config::{DECODED_EXTENSION, IO_BUFFER_SIZE, LZF_EXTENSION};
use crate::displaylevel;
use crate::stream::parallel::resolve_workers;
use crate::stream::{LzfReader, LzfWriter, ParallelLzfWriter};

// ── Name resolution ──────────────────────────────────────────────────────────

#[inline]
fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == STDIO_MARK
}

/// `FILE` → `FILE.lzf`.
pub fn compressed_name(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(LZF_EXTENSION);
    PathBuf::from(name)
}

/// `FILE.lzf` → `FILE`; anything else → `NAME.out`.
pub fn decompressed_name(input: &Path) -> PathBuf {
    let s = input.to_string_lossy();
    match s.strip_suffix(LZF_EXTENSION) {
        Some(stem) if !stem.is_empty() => PathBuf::from(stem),
        _ => {
            let mut name = input.as_os_str().to_owned();
            name.push(DECODED_EXTENSION);
            PathBuf::from(name)
        }
    }
}

/// Where output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File(PathBuf),
}

/// Resolve the destination from `-o`/`-c` and the derived default.
pub fn resolve_destination(
    input: &Path,
    output: Option<&Path>,
    to_stdout: bool,
    default_name: fn(&Path) -> PathBuf,
) -> Destination {
    if to_stdout {
        return Destination::Stdout;
    }
    match output {
        Some(p) if is_stdio(p) => Destination::Stdout,
        Some(p) => Destination::File(p.to_path_buf()),
        None if is_stdio(input) => Destination::Stdout,
        None => Destination::File(default_name(input)),
    }
}

// ── Opening ──────────────────────────────────────────────────────────────────

fn open_src(path: &Path) -> Result<Box<dyn Read>> {
    if is_stdio(path) {
        displaylevel!(4, "Using stdin for input\n");
        return Ok(Box::new(io::stdin().lock()));
    }
    if path.is_dir() {
        bail!("{}: is a directory", path.display());
    }
    let f = File::open(path).with_context(|| format!("{}: cannot open", path.display()))?;
    Ok(Box::new(BufReader::with_capacity(IO_BUFFER_SIZE, f)))
}

fn open_dst(dst: &Destination, force: bool) -> Result<Box<dyn Write>> {
    match dst {
        Destination::Stdout => {
            displaylevel!(4, "Using stdout for output\n");
            Ok(Box::new(io::stdout().lock()))
        }
        Destination::File(path) => {
            if !force && path.exists() {
                bail!("{}: already exists; not overwritten (use -f)", path.display());
            }
            let f = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(path)
                .with_context(|| format!("{}: cannot create", path.display()))?;
            Ok(Box::new(BufWriter::with_capacity(IO_BUFFER_SIZE, f)))
        }
    }
}

/// Copy the input's modification time onto a regular output file.
fn carry_mtime(input: &Path, dst: &Destination) -> Result<()> {
    let Destination::File(out) = dst else { return Ok(()) };
    if is_stdio(input) {
        return Ok(());
    }
    let meta = fs::metadata(input).with_context(|| format!("{}: cannot stat", input.display()))?;
    let mtime = FileTime::from_last_modification_time(&meta);
    filetime::set_file_mtime(out, mtime)
        .with_context(|| format!("{}: cannot set modification time", out.display()))
}

/// Reader/writer wrapper that counts bytes passed through.
struct Counting<T> {
    inner: T,
    bytes: u64,
}

impl<T> Counting<T> {
    fn new(inner: T) -> Self {
        Counting { inner, bytes: 0 }
    }
}

impl<R: Read> Read for Counting<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.bytes += n as u64;
        Ok(n)
    }
}

impl<W: Write> Write for Counting<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.bytes += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

// ── Operations ───────────────────────────────────────────────────────────────

/// Byte counts of one file operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FileStats {
    pub bytes_in: u64,
    pub bytes_out: u64,
}

impl FileStats {
    /// Output size as a percentage of input size.
    pub fn ratio_percent(&self) -> f64 {
        if self.bytes_in == 0 {
            return 100.0;
        }
        self.bytes_out as f64 * 100.0 / self.bytes_in as f64
    }
}

/// Settings for [`compress_file`].
#[derive(Debug, Clone, Copy)]
pub struct CompressOptions {
    pub block_size: usize,
    pub strategy: Strategy,
    /// 0 = one per CPU; 1 = single-threaded writer.
    pub workers: usize,
    pub force: bool,
}

impl Default for CompressOptions {
    fn default() -> Self {
        CompressOptions {
            block_size: crate::config::BLOCK_SIZE_DEFAULT,
            strategy: Strategy::optimal(),
            workers: crate::config::NB_WORKERS_DEFAULT,
            force: false,
        }
    }
}

/// Compress `input` to `dst`.
pub fn compress_file(input: &Path, dst: &Destination, opts: &CompressOptions) -> Result<FileStats> {
    let mut src = open_src(input)?;
    let sink = Counting::new(open_dst(dst, opts.force)?);
    let workers = resolve_workers(opts.workers);

    let (bytes_in, mut sink) = if workers > 1 {
        let mut w = ParallelLzfWriter::with_strategy(sink, opts.block_size, workers, opts.strategy)?;
        let n = io::copy(&mut src, &mut w).with_context(|| format!("{}: compression failed", input.display()))?;
        (n, w.finish()?)
    } else {
        let mut w = LzfWriter::with_strategy(sink, opts.block_size, opts.strategy)?;
        let n = io::copy(&mut src, &mut w).with_context(|| format!("{}: compression failed", input.display()))?;
        (n, w.finish()?)
    };
    sink.flush()?;
    let Counting { inner, bytes: bytes_out } = sink;
    drop(inner);
    carry_mtime(input, dst)?;

    let stats = FileStats { bytes_in, bytes_out };
    displaylevel!(
        2,
        "Compressed {} bytes into {} bytes ==> {:.2}%\n",
        stats.bytes_in,
        stats.bytes_out,
        stats.ratio_percent()
    );
    Ok(stats)
}

/// Decompress `input` to `dst`.
pub fn decompress_file(input: &Path, dst: &Destination, strategy: Strategy, force: bool) -> Result<FileStats> {
    let mut reader = Counting::new(open_src(input)?);
    let mut sink = open_dst(dst, force)?;
    let mut r = LzfReader::with_strategy(&mut reader, strategy);
    let bytes_out = io::copy(&mut r, &mut sink)
        .with_context(|| format!("{}: decoding failed", input.display()))?;
    sink.flush()?;
    drop(sink);
    carry_mtime(input, dst)?;

    let stats = FileStats { bytes_in: reader.bytes, bytes_out };
    displaylevel!(2, "{}: decoded {} bytes\n", input.display(), stats.bytes_out);
    Ok(stats)
}

/// Decode `input` and discard the output.
pub fn test_file(input: &Path, strategy: Strategy) -> Result<FileStats> {
    let mut reader = Counting::new(open_src(input)?);
    let mut r = LzfReader::with_strategy(&mut reader, strategy);
    let bytes_out = io::copy(&mut r, &mut io::sink())
        .with_context(|| format!("{}: decoding failed", input.display()))?;
    let stats = FileStats { bytes_in: reader.bytes, bytes_out };
    displaylevel!(2, "{}: {} bytes, decodes to {} bytes : OK\n", input.display(), stats.bytes_in, stats.bytes_out);
    Ok(stats)
}
