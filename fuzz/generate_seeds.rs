#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn header(bpp: u16, width: i32, height: i32, colors: u32) -> Vec<u8> {
    let stride = ((width.unsigned_abs() as usize * bpp as usize).div_ceil(32)) * 4;
    let raw = stride * height.unsigned_abs() as usize;
    let offset = 54 + colors as usize * 4;
    let mut bmp = vec![0u8; offset + raw];
    bmp[0] = b'B';
    bmp[1] = b'M';
    bmp[2..6].copy_from_slice(&(bmp.len() as u32).to_le_bytes()); // file size
    bmp[10..14].copy_from_slice(&(offset as u32).to_le_bytes()); // data offset
    bmp[14..18].copy_from_slice(&40u32.to_le_bytes()); // DIB header size
    bmp[18..22].copy_from_slice(&width.to_le_bytes());
    bmp[22..26].copy_from_slice(&height.to_le_bytes());
    bmp[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    bmp[28..30].copy_from_slice(&bpp.to_le_bytes());
    bmp[34..38].copy_from_slice(&(raw as u32).to_le_bytes()); // raw size
    bmp[46..50].copy_from_slice(&colors.to_le_bytes());
    for i in 0..colors as usize {
        let e = 54 + i * 4;
        bmp[e..e + 3].copy_from_slice(&[i as u8, !(i as u8), (i / 2) as u8]);
    }
    bmp
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_inspect";
    fs::create_dir_all(dir).unwrap();

    let mut bmp = header(24, 1, 1, 0);
    bmp[54..57].copy_from_slice(&[0xff, 0x00, 0x00]); // BGR
    fs::write(format!("{dir}/bmp24_1x1.bmp"), bmp).unwrap();

    fs::write(format!("{dir}/bmp24_3x2_topdown.bmp"), header(24, 3, -2, 0)).unwrap();
    fs::write(format!("{dir}/bmp1_9x2.bmp"), header(1, 9, 2, 2)).unwrap();
    fs::write(format!("{dir}/bmp2_5x1.bmp"), header(2, 5, 1, 4)).unwrap();
    fs::write(format!("{dir}/bmp4_3x3.bmp"), header(4, 3, 3, 16)).unwrap();
    fs::write(format!("{dir}/bmp8_4x2.bmp"), header(8, 4, 2, 3)).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    let mut rle = header(8, 2, 2, 2);
    rle[30] = 1;
    fs::write(format!("{dir}/bmp8_rle.bin"), rle).unwrap();

    println!("Generated seed corpus in {dir}/");
}
