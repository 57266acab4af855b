//! Builders for in-memory Debian packages.

#![allow(dead_code)]

use std::io::Write;

use tar::{EntryType, Header};
use xz2::write::XzEncoder;

pub enum Node {
    Dir(&'static str),
    File(&'static str, &'static [u8]),
    Symlink(&'static str, &'static str),
    HardLink(&'static str, &'static str),
}

pub fn tar(nodes: &[Node]) -> Vec<u8> {
    let mut builder = tar::Builder::new(Vec::new());

    for node in nodes {
        let mut header = Header::new_gnu();
        header.set_mtime(1_600_000_000);
        match node {
            Node::Dir(path) => {
                header.set_entry_type(EntryType::Directory);
                header.set_mode(0o755);
                header.set_size(0);
                builder.append_data(&mut header, path, std::io::empty()).unwrap();
            }
            Node::File(path, data) => {
                header.set_entry_type(EntryType::Regular);
                header.set_mode(0o644);
                header.set_size(data.len() as u64);
                builder.append_data(&mut header, path, *data).unwrap();
            }
            Node::Symlink(path, target) => {
                header.set_entry_type(EntryType::Symlink);
                header.set_mode(0o777);
                header.set_size(0);
                header.set_link_name(target).unwrap();
                builder.append_data(&mut header, path, std::io::empty()).unwrap();
            }
            Node::HardLink(path, target) => {
                header.set_entry_type(EntryType::Link);
                header.set_mode(0o644);
                header.set_size(0);
                header.set_link_name(target).unwrap();
                builder.append_data(&mut header, path, std::io::empty()).unwrap();
            }
        }
    }

    builder.into_inner().unwrap()
}

/// A payload holding a single regular file with owned content
pub fn tar_owned(path: &str, data: &[u8]) -> Vec<u8> {
    let mut builder = tar::Builder::new(Vec::new());
    let mut header = Header::new_gnu();
    header.set_mtime(1_600_000_000);
    header.set_entry_type(EntryType::Regular);
    header.set_mode(0o644);
    header.set_size(data.len() as u64);
    builder.append_data(&mut header, path, data).unwrap();
    builder.into_inner().unwrap()
}

/// Deterministic bytes that xz cannot shrink
pub fn noise(len: usize) -> Vec<u8> {
    let mut state: u64 = 0x9e37_79b9_7f4a_7c15;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state >> 24) as u8
        })
        .collect()
}

pub fn xz(data: &[u8]) -> Vec<u8> {
    let mut encoder = XzEncoder::new(Vec::new(), 6);
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Serialize an `ar` archive with the given members
pub fn ar(members: &[(&str, &[u8])]) -> Vec<u8> {
    let mut buf = b"!<arch>\n".to_vec();
    for (name, data) in members {
        buf.extend_from_slice(format!("{name:<16}").as_bytes());
        buf.extend_from_slice(format!("{:<12}", 1_600_000_000).as_bytes());
        buf.extend_from_slice(format!("{:<6}{:<6}{:<8}", 0, 0, 100644).as_bytes());
        buf.extend_from_slice(format!("{:<10}", data.len()).as_bytes());
        buf.extend_from_slice(b"`\n");
        buf.extend_from_slice(data);
        if data.len() % 2 == 1 {
            buf.push(b'\n');
        }
    }
    buf
}

pub fn control() -> Vec<u8> {
    xz(&tar(&[
        Node::File("./control", b"Package: libtest0\nVersion: 1.0\nArchitecture: armhf\n"),
    ]))
}

/// A package whose payload holds `nodes`
pub fn deb(nodes: &[Node]) -> Vec<u8> {
    let data = xz(&tar(nodes));
    ar(&[
        ("debian-binary", b"2.0\n"),
        ("control.tar.xz", &control()),
        ("data.tar.xz", &data),
    ])
}

pub const LIBZ: &[u8] = b"\x7fELF\x01\x01\x01\0libz contents";
pub const README: &[u8] = b"zlib for Debian\n\nSome more text.\n";

/// Typical shared library package layout
pub fn libz_deb() -> Vec<u8> {
    deb(&[
        Node::Dir("./lib/"),
        Node::Dir("./lib/arm-linux-gnueabihf/"),
        Node::Symlink("./lib/arm-linux-gnueabihf/libz.so.1", "libz.so.1.2.11"),
        Node::File("./lib/arm-linux-gnueabihf/libz.so.1.2.11", LIBZ),
        Node::Dir("./usr/share/doc/zlib1g/"),
        Node::File("./usr/share/doc/zlib1g/README.Debian", README),
    ])
}
