use std::io;

use image::GrayImage;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, dictionary};

use crate::document::layout::{CellPlacement, GridLayout};
use crate::raster::{RenderedLabel, pack_bits};

/// Serialize placed labels as a PDF, one image XObject per label.
pub fn write_pdf(
    labels: &[RenderedLabel],
    placements: &[CellPlacement],
    layout: &GridLayout,
) -> io::Result<Vec<u8>> {
    let page_count = placements.last().map_or(1, |p| p.page + 1);

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut page_ops: Vec<Vec<Operation>> = vec![Vec::new(); page_count];
    let mut page_images: Vec<Dictionary> = vec![Dictionary::new(); page_count];

    for (label, placement) in labels.iter().zip(placements) {
        let image_id = doc.add_object(image_stream(&label.image));
        let name = format!("Im{}", placement.index + 1);
        page_images[placement.page].set(name.as_bytes().to_vec(), image_id);

        let ops = &mut page_ops[placement.page];
        if layout.border_width > 0.0 {
            let cell = placement.cell;
            ops.push(Operation::new("w", vec![layout.border_width.into()]));
            ops.push(Operation::new(
                "re",
                vec![
                    cell.x.into(),
                    cell.y.into(),
                    cell.width.into(),
                    cell.height.into(),
                ],
            ));
            ops.push(Operation::new("S", vec![]));
        }
        let image = placement.image;
        ops.push(Operation::new("q", vec![]));
        ops.push(Operation::new(
            "cm",
            vec![
                image.width.into(),
                0_i64.into(),
                0_i64.into(),
                image.height.into(),
                image.x.into(),
                image.y.into(),
            ],
        ));
        ops.push(Operation::new("Do", vec![Object::Name(name.into_bytes())]));
        ops.push(Operation::new("Q", vec![]));
    }

    let mut kids: Vec<Object> = Vec::with_capacity(page_count);
    for (operations, images) in page_ops.into_iter().zip(page_images) {
        let content = Content { operations }.encode().map_err(to_io)?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let media_box: Vec<Object> = vec![
            0_i64.into(),
            0_i64.into(),
            layout.page_width.into(),
            layout.page_height.into(),
        ];
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => media_box,
            "Contents" => content_id,
            "Resources" => dictionary! { "XObject" => images },
        });
        kids.push(page_id.into());
    }

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count as i64,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).map_err(to_io)?;
    Ok(bytes)
}

/// 1-bit DeviceGray image; a set bit is white.
fn image_stream(image: &GrayImage) -> Stream {
    Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => image.width() as i64,
            "Height" => image.height() as i64,
            "ColorSpace" => "DeviceGray",
            "BitsPerComponent" => 1_i64,
            "Interpolate" => false,
        },
        pack_bits(image),
    )
}

fn to_io<E: std::fmt::Display>(err: E) -> io::Error {
    io::Error::other(err.to_string())
}
