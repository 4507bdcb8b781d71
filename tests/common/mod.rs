#![allow(dead_code)]

use std::fs::File;
use std::io::{Cursor, Write};
use std::path::Path;
use tiff::decoder::{Decoder, DecodingResult};

const MI_INT8: u32 = 1;
const MI_UINT8: u32 = 2;
const MI_INT16: u32 = 3;
const MI_UINT16: u32 = 4;
const MI_INT32: u32 = 5;
const MI_UINT32: u32 = 6;
const MI_DOUBLE: u32 = 9;
const MI_MATRIX: u32 = 14;

const MX_CHAR_CLASS: u32 = 4;
const MX_DOUBLE_CLASS: u32 = 6;
const MX_UINT8_CLASS: u32 = 9;
const MX_INT16_CLASS: u32 = 10;

const COMPLEX_FLAG: u32 = 0x0800;

/// one variable of a Level 5 MAT file
pub struct MatVar {
    pub name: String,
    pub dims: Vec<usize>,
    class: u32,
    data_type: u32,
    real: Vec<u8>,
    imag: Option<Vec<u8>>,
}

impl MatVar {

    fn new(name:&str, dims:&[usize], class:u32, data_type:u32, real:Vec<u8>) -> MatVar {
        MatVar { name: name.to_string(), dims: dims.to_vec(), class, data_type, real, imag: None }
    }

    pub fn double(name:&str, dims:&[usize], data:&[f64]) -> MatVar {
        assert_eq!(dims.iter().product::<usize>(),data.len());
        MatVar::new(name,dims,MX_DOUBLE_CLASS,MI_DOUBLE,data.iter().flat_map(|v| v.to_le_bytes()).collect())
    }

    pub fn complex(name:&str, dims:&[usize], re:&[f64], im:&[f64]) -> MatVar {
        let mut var = MatVar::double(name,dims,re);
        var.imag = Some(im.iter().flat_map(|v| v.to_le_bytes()).collect());
        var
    }

    pub fn uint8(name:&str, dims:&[usize], data:&[u8]) -> MatVar {
        assert_eq!(dims.iter().product::<usize>(),data.len());
        MatVar::new(name,dims,MX_UINT8_CLASS,MI_UINT8,data.to_vec())
    }

    pub fn int16(name:&str, dims:&[usize], data:&[i16]) -> MatVar {
        assert_eq!(dims.iter().product::<usize>(),data.len());
        MatVar::new(name,dims,MX_INT16_CLASS,MI_INT16,data.iter().flat_map(|v| v.to_le_bytes()).collect())
    }

    /// a 1 x n char row vector
    pub fn char(name:&str, text:&str) -> MatVar {
        let chars:Vec<u16> = text.encode_utf16().collect();
        MatVar::new(name,&[1,chars.len()],MX_CHAR_CLASS,MI_UINT16,chars.iter().flat_map(|v| v.to_le_bytes()).collect())
    }

}

/// tag + payload padded to a multiple of 8 bytes
fn element(data_type:u32, payload:&[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(8 + payload.len() + 7);
    out.extend_from_slice(&data_type.to_le_bytes());
    out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    out.extend_from_slice(payload);
    while out.len() % 8 != 0 {
        out.push(0);
    }
    out
}

fn matrix(var:&MatVar) -> Vec<u8> {
    let mut flags = var.class;
    if var.imag.is_some() {
        flags |= COMPLEX_FLAG;
    }
    let mut body = vec![];
    body.extend(element(MI_UINT32,&[flags.to_le_bytes(),0u32.to_le_bytes()].concat()));
    let dims:Vec<u8> = var.dims.iter().flat_map(|&d| (d as i32).to_le_bytes()).collect();
    body.extend(element(MI_INT32,&dims));
    body.extend(element(MI_INT8,var.name.as_bytes()));
    body.extend(element(var.data_type,&var.real));
    if let Some(imag) = &var.imag {
        body.extend(element(var.data_type,imag));
    }
    element(MI_MATRIX,&body)
}

/// writes an uncompressed little-endian Level 5 MAT file
pub fn write_mat(path:&Path, vars:&[MatVar]) {
    let mut header = vec![b' ';116];
    let text = b"MATLAB 5.0 MAT-file, Platform: GLNXA64, Created on: Sun Oct 18 12:00:00 2026";
    header[..text.len()].copy_from_slice(text);
    header.extend_from_slice(&[0u8;8]);
    header.extend_from_slice(&0x0100u16.to_le_bytes());
    header.extend_from_slice(b"IM");

    let mut f = File::create(path).unwrap();
    f.write_all(&header).unwrap();
    for var in vars {
        f.write_all(&matrix(var)).unwrap();
    }
}

/// column-major samples of an (nx, ny, nz) volume
pub fn volume_samples(shape:[usize;3], f:impl Fn(usize,usize,usize) -> f64) -> Vec<f64> {
    let [nx,ny,nz] = shape;
    let mut out = Vec::with_capacity(nx*ny*nz);
    for z in 0..nz {
        for y in 0..ny {
            for x in 0..nx {
                out.push(f(x,y,z));
            }
        }
    }
    out
}

pub struct Page {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// decodes every page of an 8-bit grayscale tiff
pub fn read_pages(path:&Path) -> Vec<Page> {
    let bytes = std::fs::read(path).unwrap();
    let mut dec = Decoder::new(Cursor::new(bytes)).unwrap();
    let mut pages = vec![];
    loop {
        let (width,height) = dec.dimensions().unwrap();
        assert_eq!(dec.colortype().unwrap(),tiff::ColorType::Gray(8));
        let pixels = match dec.read_image().unwrap() {
            DecodingResult::U8(px) => px,
            _ => panic!("expected 8-bit samples"),
        };
        pages.push(Page { width, height, pixels });
        if !dec.more_images() {
            break;
        }
        dec.next_image().unwrap();
    }
    pages
}
