//! Integration tests for aces-clip.
//!
//! These go through real files: a clip is built with the writer, saved into
//! a temporary directory and read back.

#[cfg(test)]
mod tests {
    use aces_clip::writer::{ITL_LINK_DEFAULT, PTL_LINK_DEFAULT};
    use aces_clip::{
        AscCdl, BitDepth, ClipDescriptor, ClipError, ClipWriter, GradeRef, PreviewOutput,
        TransformRef, TransformStatus, read_clip,
    };
    use approx::assert_relative_eq;
    use chrono::{TimeZone, Utc};
    use std::fs;
    use tempfile::tempdir;

    fn grade() -> GradeRef {
        GradeRef {
            convert_to: "ACEScsc.ACES_to_ACEScct".into(),
            convert_from: "ACEScsc.ACEScct_to_ACES".into(),
            in_bit_depth: BitDepth::Float32,
            out_bit_depth: BitDepth::Int10,
            cdl: AscCdl::new([1.2, 1.0, 0.95], [0.01, -0.005, 0.0], [0.9, 1.0, 1.1])
                .with_saturation(1.15),
            status: TransformStatus::Preview,
        }
    }

    /// Full writer sequence, separate RRT and ODT.
    #[test]
    fn test_roundtrip_separate_rrt_odt() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("A001C003.ACESclip.xml");

        let clip_date = Utc.with_ymd_and_hms(2015, 5, 4, 12, 30, 0).unwrap();
        let xml_date = Utc.with_ymd_and_hms(2015, 5, 6, 9, 15, 42).unwrap();

        let idt = TransformRef::new("IDT.ARRI.Alexa-v3-logC-EI800", TransformStatus::Applied)
            .with_link("alexa_idt.clf");
        let lmts = [
            TransformRef::new("LMT.Show.Base", TransformStatus::Preview),
            TransformRef::new("LMT.Show.Night", TransformStatus::Applied),
            TransformRef::new("LMT.Show.Bleach", TransformStatus::Preview).with_link("bleach.clf"),
        ];
        let rrt = TransformRef::new("RRT", TransformStatus::Preview);
        let odt = TransformRef::new("ODT.Academy.Rec709_100nits_dim", TransformStatus::Preview);

        let mut w = ClipWriter::new();
        w.info("mrViewer", "5.1.2", "dailies")
            .clip_id("A001C003", "show,shot010,take3", &clip_date)
            .config(&xml_date)
            .itl_start()
            .add_idt(&idt)
            .grade_ref(&grade())
            .itl_end(ITL_LINK_DEFAULT)
            .ptl_start();
        for lmt in &lmts {
            w.add_lmt(lmt);
        }
        w.add_rrt(&rrt).add_odt(&odt).ptl_end(PTL_LINK_DEFAULT);
        w.save(&path).expect("Failed to write clip");

        let expected = ClipDescriptor {
            application: "mrViewer".into(),
            version: "5.1.2".into(),
            comment: "dailies".into(),
            clip_name: "A001C003".into(),
            media_id: "show,shot010,take3".into(),
            clip_date: "2015-05-04 Time: 12:30:00".into(),
            timestamp: "2015-05-06T09:15:42".into(),
            convert_to: grade().convert_to,
            convert_from: grade().convert_from,
            in_bit_depth: BitDepth::Float32,
            out_bit_depth: BitDepth::Int10,
            grade_status: TransformStatus::Preview,
            cdl: grade().cdl,
            idt,
            lmt: lmts.to_vec(),
            rrtodt: TransformRef::default(),
            rrt,
            odt,
            link_itl: ITL_LINK_DEFAULT.into(),
            link_ptl: PTL_LINK_DEFAULT.into(),
        };

        let loaded = read_clip(&path).expect("Failed to read clip");
        assert_eq!(loaded, expected);
        assert!(matches!(loaded.preview_output(), PreviewOutput::Separate { .. }));
    }

    /// Combined RRTODT branch, no grade, no LMTs.
    #[test]
    fn test_roundtrip_combined_rrtodt() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("combined.xml");
        let now = Utc.with_ymd_and_hms(2021, 11, 30, 23, 59, 59).unwrap();

        let rrtodt = TransformRef::new(
            "RRTODT.Academy.P3D65_108nits_7.2nits_ST2084",
            TransformStatus::Applied,
        );

        let mut w = ClipWriter::new();
        w.info_default()
            .clip_id("B002", "", &now)
            .config(&now)
            .itl_start()
            .add_idt(&TransformRef::new("IDT.Sony.SLog3_SGamut3", TransformStatus::Preview))
            .itl_end(ITL_LINK_DEFAULT)
            .ptl_start()
            .add_rrtodt(&rrtodt)
            .ptl_end(PTL_LINK_DEFAULT);
        w.save(&path).unwrap();

        let loaded = read_clip(&path).unwrap();
        assert_eq!(loaded.application, "ACESclipLib");
        assert_eq!(loaded.version, "0.1");
        assert!(loaded.media_id.is_empty());
        assert!(loaded.lmt.is_empty());
        assert!(loaded.cdl.is_identity());
        assert!(!loaded.has_grade());
        assert_eq!(loaded.rrtodt, rrtodt);
        assert!(loaded.rrt.is_empty());
        assert!(loaded.odt.is_empty());
        match loaded.preview_output() {
            PreviewOutput::Combined(t) => assert_eq!(t.name, rrtodt.name),
            other => panic!("expected combined output, got {:?}", other),
        }
    }

    /// A hand-written file in the legacy layout (unprefixed lists, `name`
    /// attributes) read from disk.
    #[test]
    fn test_read_legacy_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("legacy.xml");
        fs::write(
            &path,
            r#"<?xml version="1.0" encoding="UTF-8"?>
<aces:ACESmetadata xmlns:aces="http://www.oscars.org/aces/ref/acesmetadata">
  <ContainerFormatVersion>0.9</ContainerFormatVersion>
  <aces:Info><Application version="0.1">ACESclipLib</Application></aces:Info>
  <aces:ClipID><ClipName>legacy</ClipName><ClipDate>2014-12-01</ClipDate></aces:ClipID>
  <aces:Config>
    <ACESrelease_Version>0.7.1</ACESrelease_Version>
    <InputTransformList>
      <aces:IDTref name="IDT.RED.REDlogFilm" status="applied"/>
      <aces:GradeRef>
        <Convert_to_WorkSpace TransformID="ACEScsc.ACES_to_ACEScc"/>
        <ColorDecisionList>
          <ASC_CDL inBitDepth="16i" outBitDepth="16i">
            <SatNode><Saturation>0.5</Saturation></SatNode>
          </ASC_CDL>
        </ColorDecisionList>
        <Convert_from_WorkSpace TransformID="ACEScsc.ACEScc_to_ACES"/>
      </aces:GradeRef>
    </InputTransformList>
    <PreviewTransformList>
      <aces:LMTref name="LMT.Old"/>
      <aces:RRTref name="RRT.a1.0.0"/>
      <aces:ODTref name="ODT.Academy.RGBmonitor_100nits_dim"/>
    </PreviewTransformList>
  </aces:Config>
</aces:ACESmetadata>"#,
        )
        .unwrap();

        let clip = read_clip(&path).unwrap();
        assert_eq!(clip.clip_date, "2014-12-01");
        assert_eq!(clip.idt.name, "IDT.RED.REDlogFilm");
        assert_eq!(clip.idt.status, TransformStatus::Applied);
        assert_eq!(clip.in_bit_depth, BitDepth::Int16);
        assert_eq!(clip.cdl.slope, [1.0, 1.0, 1.0]);
        assert_relative_eq!(clip.cdl.saturation, 0.5);
        assert_eq!(clip.lmt.len(), 1);
        assert_eq!(clip.lmt[0].name, "LMT.Old");
        assert_eq!(clip.rrt.name, "RRT.a1.0.0");
        assert_eq!(clip.odt.name, "ODT.Academy.RGBmonitor_100nits_dim");
        assert!(clip.link_itl.is_empty());
        assert!(clip.link_ptl.is_empty());
    }

    #[test]
    fn test_read_non_aces_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("grade.cc");
        fs::write(
            &path,
            r#"<ColorCorrection id="foo">
  <SOPNode><Slope>1 1 1</Slope></SOPNode>
</ColorCorrection>"#,
        )
        .unwrap();

        let err = read_clip(&path).unwrap_err();
        assert!(matches!(err, ClipError::NotAnAcesFile));
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempdir().unwrap();
        let err = read_clip(&dir.path().join("missing.xml")).unwrap_err();
        assert!(matches!(err, ClipError::Io(_)));
    }
}
